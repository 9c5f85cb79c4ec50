//! Declarative page animations and their hand-off to an animation engine.
//!
//! Nothing here animates by itself: the table describes tweens in the
//! engine's vocabulary and [`wire`] passes each entry to an
//! [`AnimationEngine`]. Without an engine the page simply stays static.

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;

/// Easing curves, serialised under the engine's names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ease {
    #[serde(rename = "none")]
    Linear,
    #[default]
    #[serde(rename = "power2.out")]
    Power2Out,
    #[serde(rename = "power3.out")]
    Power3Out,
    #[serde(rename = "power4.out")]
    Power4Out,
    #[serde(rename = "back.out")]
    BackOut,
    #[serde(rename = "expo.out")]
    ExpoOut,
    #[serde(rename = "sine.inOut")]
    SineInOut,
}

impl Ease {
    pub fn name(&self) -> &'static str {
        match self {
            Ease::Linear => "none",
            Ease::Power2Out => "power2.out",
            Ease::Power3Out => "power3.out",
            Ease::Power4Out => "power4.out",
            Ease::BackOut => "back.out",
            Ease::ExpoOut => "expo.out",
            Ease::SineInOut => "sine.inOut",
        }
    }
}

/// What a scroll-triggered tween watches.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerTarget {
    /// Every matched element triggers its own tween.
    #[default]
    Each,
    /// One element, selected separately, triggers the whole group.
    Selector(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollTrigger {
    pub target: TriggerTarget,
    /// Activation threshold as `"<element edge> <viewport edge>"`.
    pub start: String,
    /// Replay policy for enter, leave, enter-back and leave-back.
    pub toggle_actions: String,
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self {
            target: TriggerTarget::Each,
            start: "top 85%".to_string(),
            toggle_actions: "play none none none".to_string(),
        }
    }
}

/// Property deltas and timing for one tween.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tween {
    pub opacity: Option<f32>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub scale: Option<f32>,
    /// Seconds.
    pub duration: f32,
    pub delay: f32,
    /// Offset between consecutive matched elements; `0` animates them together.
    pub stagger: f32,
    pub ease: Ease,
    pub scroll_trigger: Option<ScrollTrigger>,
}

impl Default for Tween {
    fn default() -> Self {
        Self {
            opacity: None,
            x: None,
            y: None,
            scale: None,
            duration: 0.8,
            delay: 0.0,
            stagger: 0.0,
            ease: Ease::default(),
            scroll_trigger: None,
        }
    }
}

impl Tween {
    /// Fade in while rising `distance` pixels into place.
    pub fn fade_up(distance: f32, duration: f32) -> Self {
        Self {
            opacity: Some(0.0),
            y: Some(distance),
            duration,
            ..Self::default()
        }
    }

    pub fn delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    pub fn stagger(mut self, stagger: f32) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn on_scroll(mut self, trigger: ScrollTrigger) -> Self {
        self.scroll_trigger = Some(trigger);
        self
    }
}

/// Animate matched elements *from* `from` to their styled state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reveal {
    pub selector: String,
    pub from: Tween,
}

/// Tween to `enter` on pointer enter and to `leave` on pointer leave.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hover {
    pub selector: String,
    pub enter: Tween,
    pub leave: Tween,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageAnimations {
    /// Played once when the page is ready.
    pub intro: Vec<Reveal>,
    /// Played as elements scroll into view.
    pub reveals: Vec<Reveal>,
    pub hovers: Vec<Hover>,
    /// Links whose in-page targets are scrolled to smoothly.
    pub anchors: Option<String>,
}

impl Default for PageAnimations {
    fn default() -> Self {
        let reveal = |selector: &str, from: Tween| Reveal {
            selector: selector.to_string(),
            from,
        };
        let lift = |selector: &str, y: f32, scale: f32| Hover {
            selector: selector.to_string(),
            enter: Tween {
                y: Some(y),
                scale: Some(scale),
                duration: 0.3,
                ..Tween::default()
            },
            leave: Tween {
                y: Some(0.0),
                scale: Some(1.0),
                duration: 0.3,
                ..Tween::default()
            },
        };
        let in_view = ScrollTrigger::default;

        Self {
            intro: vec![
                reveal(
                    ".nav",
                    Tween {
                        opacity: Some(0.0),
                        y: Some(-20.0),
                        duration: 0.6,
                        ..Tween::default()
                    },
                ),
                reveal(
                    ".hero-title",
                    Tween::fade_up(50.0, 1.0)
                        .delay(0.2)
                        .ease(Ease::Power3Out),
                ),
                reveal(
                    ".hero-subtitle",
                    Tween::fade_up(30.0, 1.0)
                        .delay(0.4)
                        .ease(Ease::Power3Out),
                ),
                reveal(
                    ".hero-cta",
                    Tween {
                        opacity: Some(0.0),
                        scale: Some(0.9),
                        duration: 0.8,
                        delay: 0.6,
                        ease: Ease::BackOut,
                        ..Tween::default()
                    },
                ),
            ],
            reveals: vec![
                reveal(
                    ".section-title",
                    Tween::fade_up(40.0, 0.8).on_scroll(in_view()),
                ),
                reveal(
                    ".feature-card",
                    Tween::fade_up(60.0, 0.8).stagger(0.15).on_scroll(ScrollTrigger {
                        target: TriggerTarget::Selector(".features".to_string()),
                        start: "top 75%".to_string(),
                        ..in_view()
                    }),
                ),
                reveal(
                    ".stat",
                    Tween {
                        opacity: Some(0.0),
                        scale: Some(0.8),
                        duration: 0.6,
                        stagger: 0.1,
                        ease: Ease::BackOut,
                        scroll_trigger: Some(ScrollTrigger {
                            target: TriggerTarget::Selector(".stats".to_string()),
                            start: "top 80%".to_string(),
                            ..in_view()
                        }),
                        ..Tween::default()
                    },
                ),
                reveal(
                    ".testimonial",
                    Tween {
                        opacity: Some(0.0),
                        x: Some(-40.0),
                        duration: 0.8,
                        stagger: 0.2,
                        scroll_trigger: Some(in_view()),
                        ..Tween::default()
                    },
                ),
                reveal(
                    ".footer",
                    Tween::fade_up(20.0, 0.6).on_scroll(ScrollTrigger {
                        start: "top 95%".to_string(),
                        ..in_view()
                    }),
                ),
            ],
            hovers: vec![
                lift(".feature-card", -8.0, 1.02),
                lift(".btn", -2.0, 1.05),
            ],
            anchors: Some(r##"a[href^="#"]"##.to_string()),
        }
    }
}

/// Engine the animation table is handed to.
///
/// Implementations apply one entry per call and report failures per entry;
/// [`wire`] keeps going after a failure.
pub trait AnimationEngine {
    fn reveal(&self, reveal: &Reveal) -> Result<(), AnimationError>;

    fn hover(&self, hover: &Hover) -> Result<(), AnimationError>;

    fn smooth_scroll(&self, anchors: &str) -> Result<(), AnimationError>;
}

/// Outcome of [`wire`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WireReport {
    pub applied: usize,
    pub failed: usize,
}

impl WireReport {
    fn record(&mut self, what: &str, result: Result<(), AnimationError>) {
        match result {
            Ok(()) => self.applied += 1,
            Err(err) => {
                log::warn!("skipping {what}: {err}");
                self.failed += 1;
            }
        }
    }
}

/// Hand every entry of `animations` to `engine`.
///
/// With no engine nothing is called and the page keeps its static styling.
pub fn wire<E: AnimationEngine + ?Sized>(
    engine: Option<&E>,
    animations: &PageAnimations,
) -> WireReport {
    let mut report = WireReport::default();
    let Some(engine) = engine else {
        log::warn!("animation engine not loaded; page animations disabled");
        return report;
    };

    for reveal in animations.intro.iter().chain(&animations.reveals) {
        report.record(&reveal.selector, engine.reveal(reveal));
    }
    for hover in &animations.hovers {
        report.record(&hover.selector, engine.hover(hover));
    }
    if let Some(anchors) = &animations.anchors {
        report.record(anchors, engine.smooth_scroll(anchors));
    }

    log::info!(
        "page animations wired: {} applied, {} skipped",
        report.applied,
        report.failed
    );
    report
}
