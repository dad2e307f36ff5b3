use std::fmt::Write;

/// Label of the quad shader module and pipeline.
pub const SHADER_LABEL: &str = "Texture";

const TEMPLATE: &str = include_str!("shaders/quad.wgsl");

/// First binding index of the texture array in group 0.
pub(crate) const FIRST_TEXTURE_BINDING: u32 = 2;

/// WGSL source of the quad shader with `slots` texture bindings
/// (`u_texture_0..slots`).
pub fn quad_shader_source(slots: usize) -> String {
    assert!(slots >= 1, "quad shader needs at least the white slot");

    let mut bindings = String::new();
    let mut cases = String::new();
    for slot in 0..slots {
        let binding = FIRST_TEXTURE_BINDING as usize + slot;
        // Writing into a String cannot fail.
        let _ = writeln!(
            bindings,
            "@group(0) @binding({binding}) var u_texture_{slot}: texture_2d<f32>;"
        );
        if slot > 0 {
            let _ = writeln!(
                cases,
                "        case {slot}: {{ return textureSampleLevel(u_texture_{slot}, u_sampler, uv, 0.0); }}"
            );
        }
    }

    TEMPLATE
        .replace("{{TEXTURE_BINDINGS}}", bindings.trim_end())
        .replace("{{SLOT_CASES}}", cases.trim_end_matches('\n'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_one_binding_per_slot() {
        let src = quad_shader_source(4);
        for slot in 0..4 {
            let decl = format!("@binding({}) var u_texture_{slot}:", slot + 2);
            assert!(src.contains(&decl), "missing {decl}");
        }
        assert!(!src.contains("u_texture_4"));
        assert!(!src.contains("{{"));
    }

    #[test]
    fn slot_zero_is_the_default_case() {
        let src = quad_shader_source(3);
        assert!(!src.contains("case 0:"));
        assert!(src.contains("case 1: { return textureSampleLevel(u_texture_1"));
        assert!(src.contains("case 2: { return textureSampleLevel(u_texture_2"));
        assert!(src.contains("default: {"));
    }

    #[test]
    fn keeps_uniform_and_entry_points() {
        let src = quad_shader_source(32);
        assert!(src.contains("var<uniform> u_view_projection: mat4x4<f32>"));
        assert!(src.contains("fn vs_main"));
        assert!(src.contains("fn fs_main"));
        assert_eq!(src.matches("textureSampleLevel(").count(), 32);
    }

    #[test]
    #[should_panic(expected = "white slot")]
    fn zero_slots_rejected() {
        quad_shader_source(0);
    }
}
