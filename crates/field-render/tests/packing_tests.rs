use field_core::*;
use field_render::packing::*;
use field_render::FIELD_WGSL;
use glam::{Mat4, Vec3};

fn group(sizes: Option<Vec<f32>>) -> ParticleGroup {
    ParticleGroup::from_parts(
        vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, 0.0, 4.0)],
        vec![Vec3::ZERO; 2],
        vec![Vec3::new(1.0, 0.0, 1.0), Vec3::new(0.0, 1.0, 1.0)],
        sizes,
        GroupStyle {
            point_size: 0.4,
            opacity: 0.8,
            blend: Blend::Additive,
        },
    )
    .expect("matching lengths")
}

#[test]
fn gpu_layouts_match_shader_sizes() {
    assert_eq!(std::mem::size_of::<Uniforms>(), 160);
    assert_eq!(std::mem::size_of::<Instance>(), 32);
    assert_eq!(Instance::layout().array_stride, 32);
    assert_eq!(line_layout().array_stride, 12);
}

#[test]
fn instances_follow_particle_order() {
    let mut out = Vec::new();
    pack_instances(&group(Some(vec![0.5, 2.0])), &mut out);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].position, [1.0, 2.0, 3.0]);
    assert_eq!(out[0].size, 0.5);
    assert_eq!(out[1].color, [0.0, 1.0, 1.0]);
    assert_eq!(out[1].size, 2.0);
}

#[test]
fn missing_size_scale_packs_unit_size() {
    let mut out = vec![Instance {
        position: [9.0; 3],
        size: 9.0,
        color: [9.0; 3],
        _pad: 0.0,
    }; 5];
    pack_instances(&group(None), &mut out);
    assert_eq!(out.len(), 2);
    assert!(out.iter().all(|i| i.size == 1.0));
}

#[test]
fn group_uniforms_carry_style() {
    let g = group(None);
    let u = Uniforms::for_group(Mat4::IDENTITY, &g);
    assert_eq!(u.tint, [1.0, 1.0, 1.0, 0.8]);
    assert_eq!(u.params[0], 0.4);
    assert_eq!(u.model, Mat4::IDENTITY.to_cols_array_2d());
}

#[test]
fn line_uniforms_use_link_style() {
    let style = LineStyle::default();
    let model = Mat4::from_rotation_y(0.3);
    let u = Uniforms::for_lines(Mat4::IDENTITY, model, &style);
    assert_eq!(u.tint, [1.0, 1.0, 1.0, 0.2]);
    assert_eq!(u.model, model.to_cols_array_2d());
}

#[test]
fn surface_errors_map_onto_core_errors() {
    assert_eq!(map_surface_error(wgpu::SurfaceError::Lost), SurfaceError::Lost);
    assert_eq!(
        map_surface_error(wgpu::SurfaceError::Outdated),
        SurfaceError::Outdated
    );
    assert_eq!(
        map_surface_error(wgpu::SurfaceError::OutOfMemory),
        SurfaceError::OutOfMemory
    );
    assert_eq!(
        map_surface_error(wgpu::SurfaceError::Timeout),
        SurfaceError::Timeout
    );
}

#[test]
fn shader_exposes_all_entry_points() {
    for entry in ["fn vs_point", "fn fs_point", "fn vs_line", "fn fs_line"] {
        assert!(FIELD_WGSL.contains(entry), "missing {entry}");
    }
}
