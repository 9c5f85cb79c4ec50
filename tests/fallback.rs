#![cfg(not(target_arch = "wasm32"))]

mod common;

use common::{Call, Failure, RecordingGpu, RecordingPage};
use ocean_wasm::{launch_or_fallback, setup_or_fallback, Palette, SetupError, ShaderStage};

fn assert_fallback(page: &RecordingPage) {
    assert!(page.fallback_active.get(), "fallback should be active");
    assert!(page.canvas_hidden.get(), "canvas should be hidden");
}

#[test]
fn missing_context_engages_fallback() {
    let page = RecordingPage::default();

    let result = setup_or_fallback(None::<RecordingGpu>, &page, &Palette::default(), 0.0);

    assert!(matches!(result, Err(SetupError::ContextUnavailable)));
    assert_fallback(&page);
}

#[test]
fn vertex_failure_skips_fragment_and_link() {
    let gpu = RecordingGpu::failing(Failure::Compile(ShaderStage::Vertex));
    let page = RecordingPage::default();

    let result = setup_or_fallback(Some(gpu.clone()), &page, &Palette::default(), 0.0);

    match result {
        Err(SetupError::Compile { stage, log }) => {
            assert_eq!(stage, ShaderStage::Vertex);
            assert!(log.contains("vertex rejected"));
        }
        other => panic!("expected vertex compile error, got {:?}", other.err()),
    }
    assert_eq!(gpu.calls(), vec![Call::Compile(ShaderStage::Vertex)]);
    assert_fallback(&page);
}

#[test]
fn fragment_failure_never_links() {
    let gpu = RecordingGpu::failing(Failure::Compile(ShaderStage::Fragment));
    let page = RecordingPage::default();

    let result = setup_or_fallback(Some(gpu.clone()), &page, &Palette::default(), 0.0);

    assert!(matches!(
        result,
        Err(SetupError::Compile {
            stage: ShaderStage::Fragment,
            ..
        })
    ));
    assert!(!gpu.linked());
    assert!(gpu.draws().is_empty());
    assert_fallback(&page);
}

#[test]
fn link_failure_engages_fallback() {
    let gpu = RecordingGpu::failing(Failure::Link);
    let page = RecordingPage::default();

    let result = setup_or_fallback(Some(gpu.clone()), &page, &Palette::default(), 0.0);

    match result {
        Err(err @ SetupError::Link(_)) => {
            assert_eq!(
                err.to_string(),
                "shader program failed to link: varyings mismatch"
            );
        }
        other => panic!("expected link error, got {:?}", other.err()),
    }
    assert!(!gpu.calls().contains(&Call::UseProgram));
    assert!(gpu.draws().is_empty());
    assert_fallback(&page);
}

#[test]
fn quad_failure_engages_fallback() {
    let gpu = RecordingGpu::failing(Failure::Quad);
    let page = RecordingPage::default();

    let result = setup_or_fallback(Some(gpu.clone()), &page, &Palette::default(), 0.0);

    assert!(matches!(result, Err(SetupError::Geometry(_))));
    assert!(gpu.draws().is_empty());
    assert_fallback(&page);
}

#[test]
fn success_leaves_page_untouched() {
    let gpu = RecordingGpu::new();
    let page = RecordingPage::default();

    let mut renderer = setup_or_fallback(Some(gpu.clone()), &page, &Palette::default(), 0.0)
        .expect("setup succeeds");
    renderer.render(16.0);

    assert!(!page.fallback_active.get());
    assert!(!page.canvas_hidden.get());
    assert_eq!(gpu.draws(), vec![4]);
}

#[test]
fn failed_launch_after_setup_engages_fallback() {
    let gpu = RecordingGpu::new();
    let page = RecordingPage::default();
    let renderer = setup_or_fallback(Some(gpu.clone()), &page, &Palette::default(), 0.0)
        .expect("setup succeeds");

    let result = launch_or_fallback(&page, move || {
        drop(renderer);
        Err::<(), _>("requestAnimationFrame unavailable".to_string())
    });

    match result {
        Err(SetupError::Launch(cause)) => assert_eq!(cause, "requestAnimationFrame unavailable"),
        other => panic!("expected launch error, got {other:?}"),
    }
    assert!(gpu.draws().is_empty());
    assert_fallback(&page);
}

#[test]
fn successful_launch_leaves_page_untouched() {
    let page = RecordingPage::default();

    let frames = launch_or_fallback(&page, || Ok(3u64)).expect("launch succeeds");

    assert_eq!(frames, 3);
    assert!(!page.fallback_active.get());
    assert!(!page.canvas_hidden.get());
}
