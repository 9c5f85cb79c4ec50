//! GLSL ES 3.00 sources for the background program.

use crate::config::{Palette, Rgb};
use crate::noise::{
    DITHER_SCALE, DITHER_WEIGHT, HASH_SCALE, HASH_WEIGHTS, HIGHLIGHT_EDGE, HIGHLIGHT_WEIGHT,
    OCTAVES, RIPPLE_DRIFT, RIPPLE_SCALE, START_AMPLITUDE, SWELL_DRIFT, SWELL_SCALE, SWELL_WEIGHT,
    VIGNETTE_STRENGTH,
};

/// Vertex attribute carrying the quad corners.
pub const POSITION_ATTRIBUTE: &str = "position";
pub const TIME_UNIFORM: &str = "time";
pub const RESOLUTION_UNIFORM: &str = "resolution";

/// Full-screen quad in NDC, ordered for a triangle strip.
pub const QUAD_VERTICES: [f32; 8] = [-1.0, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0];
pub const QUAD_VERTEX_COUNT: i32 = 4;

/// Passes the 2D position through with z = 0, w = 1.
pub const VERTEX_SHADER: &str = r#"#version 300 es
in vec2 position;

void main() {
    gl_Position = vec4(position, 0.0, 1.0);
}
"#;

/// Fragment shader with `palette` baked in as constants.
pub fn fragment_source(palette: &Palette) -> String {
    format!(
        r#"#version 300 es
precision highp float;

uniform float time;
uniform vec2 resolution;

out vec4 fragColor;

const vec3 DEEP = {deep};
const vec3 MID = {mid};
const vec3 LIGHT = {light};
const vec3 HIGHLIGHT = {highlight};

float hash(vec2 p) {{
    return fract(sin(dot(p, {hash_weights})) * {hash_scale});
}}

float noise(vec2 p) {{
    vec2 i = floor(p);
    vec2 f = fract(p);
    float a = hash(i);
    float b = hash(i + vec2(1.0, 0.0));
    float c = hash(i + vec2(0.0, 1.0));
    float d = hash(i + vec2(1.0, 1.0));
    vec2 u = f * f * (3.0 - 2.0 * f);
    return mix(mix(a, b, u.x), mix(c, d, u.x), u.y);
}}

float fbm(vec2 p) {{
    float value = 0.0;
    float amplitude = {start_amplitude};
    for (int i = 0; i < {octaves}; i++) {{
        value += amplitude * noise(p);
        p *= 2.0;
        amplitude *= 0.5;
    }}
    return value;
}}

void main() {{
    vec2 uv = gl_FragCoord.xy / resolution.xy;
    vec2 st = vec2(uv.x * resolution.x / resolution.y, uv.y);

    float swell = fbm(st * {swell_scale} + {swell_drift} * time);
    float ripple = fbm(st * {ripple_scale} + {ripple_drift} * time);
    float p = mix(ripple, swell, {swell_weight});
    p += hash(uv * {dither_scale}) * {dither_weight};

    vec3 color = mix(DEEP, MID, clamp(p * 2.0, 0.0, 1.0));
    color = mix(color, LIGHT, clamp((p - 0.5) * 2.0, 0.0, 1.0));
    color = mix(color, HIGHLIGHT, smoothstep({edge0}, {edge1}, p) * {highlight_weight});

    color *= 1.0 - length(uv - 0.5) * {vignette};
    fragColor = vec4(color, 1.0);
}}
"#,
        deep = vec3(palette.deep),
        mid = vec3(palette.mid),
        light = vec3(palette.light),
        highlight = vec3(palette.highlight),
        hash_weights = vec2(HASH_WEIGHTS.x, HASH_WEIGHTS.y),
        hash_scale = float(HASH_SCALE),
        start_amplitude = float(START_AMPLITUDE),
        octaves = OCTAVES,
        swell_scale = float(SWELL_SCALE),
        swell_drift = vec2(SWELL_DRIFT.x, SWELL_DRIFT.y),
        ripple_scale = float(RIPPLE_SCALE),
        ripple_drift = vec2(RIPPLE_DRIFT.x, RIPPLE_DRIFT.y),
        swell_weight = float(SWELL_WEIGHT),
        dither_scale = float(DITHER_SCALE),
        dither_weight = float(DITHER_WEIGHT),
        edge0 = float(HIGHLIGHT_EDGE.0),
        edge1 = float(HIGHLIGHT_EDGE.1),
        highlight_weight = float(HIGHLIGHT_WEIGHT),
        vignette = float(VIGNETTE_STRENGTH),
    )
}

/// GLSL float literal. `Debug` keeps the shortest round-trip digits and always
/// prints a decimal point for the magnitudes used here.
fn float(v: f32) -> String {
    format!("{v:?}")
}

fn vec2(x: f32, y: f32) -> String {
    format!("vec2({}, {})", float(x), float(y))
}

fn vec3(c: Rgb) -> String {
    format!("vec3({}, {}, {})", float(c[0]), float(c[1]), float(c[2]))
}
