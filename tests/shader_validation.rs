//! Validates the viewer's WGSL with naga so shader mistakes show up without
//! a GPU.

const SHADER: &str = include_str!("../src/gpu/scene.wgsl");

fn parse_and_validate(code: &str) -> Result<naga::Module, String> {
    let module = naga::front::wgsl::parse_str(code)
        .map_err(|e| format!("WGSL parse error: {:?}", e))?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .map_err(|e| format!("WGSL validation error: {:?}", e))?;

    Ok(module)
}

#[test]
fn test_scene_shader_validates() {
    if let Err(e) = parse_and_validate(SHADER) {
        panic!("{}", e);
    }
}

#[test]
fn test_scene_shader_entry_points() {
    let module = parse_and_validate(SHADER).unwrap();
    let mut names: Vec<&str> = module.entry_points.iter().map(|e| e.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, ["fs_main", "vs_line", "vs_mesh"]);
}

#[test]
fn test_mesh_vertex_inputs() {
    // Position plus a 4x4 model matrix split over four vec4s plus color
    let module = parse_and_validate(SHADER).unwrap();
    let vs_mesh = module
        .entry_points
        .iter()
        .find(|e| e.name == "vs_mesh")
        .unwrap();
    assert_eq!(vs_mesh.function.arguments.len(), 6);

    let vs_line = module
        .entry_points
        .iter()
        .find(|e| e.name == "vs_line")
        .unwrap();
    assert_eq!(vs_line.function.arguments.len(), 2);
}
