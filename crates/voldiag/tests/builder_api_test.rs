//! Integration tests for the diagram builder and renderer API
//!
//! These tests render through the native SVG backend so they run without
//! Graphviz installed.

use std::fs;

use tempfile::tempdir;

use voldiag::{
    Renderer, VoldiagError,
    config::{AppConfig, BackendKind},
    semantic::{DiagramBuilder, NodeKind},
    storage_chain,
    topology::{Instance, Topology},
};

fn svg_renderer(output_dir: &std::path::Path) -> Renderer {
    let mut config = AppConfig::default();
    config.render_mut().set_backend(BackendKind::Svg);
    config.render_mut().set_output_dir(output_dir);
    Renderer::new(config)
}

#[test]
fn test_renderer_api_exists() {
    let _renderer = Renderer::default();
}

#[test]
fn test_render_canonical_chain() {
    let dir = tempdir().unwrap();
    let diagram = storage_chain("diagram").expect("Failed to build diagram");

    let path = svg_renderer(dir.path())
        .render(&diagram)
        .expect("Failed to render");

    assert_eq!(path, dir.path().join("diagram.svg"));
    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");

    // Exactly one file is produced.
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_rerender_overwrites() {
    let dir = tempdir().unwrap();
    let renderer = svg_renderer(dir.path());
    let path = dir.path().join("diagram.svg");
    fs::write(&path, "stale").unwrap();

    renderer.render(&storage_chain("diagram").unwrap()).unwrap();
    let first = fs::read_to_string(&path).unwrap();
    assert_ne!(first, "stale");

    renderer.render(&storage_chain("diagram").unwrap()).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), first);
}

#[test]
fn test_missing_output_dir_creates_nothing() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    let result = svg_renderer(&missing).render(&storage_chain("diagram").unwrap());
    assert!(matches!(result, Err(VoldiagError::Io(_))), "{result:?}");
    assert!(!missing.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_name_with_directories_is_rejected() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out");
    fs::create_dir(&out).unwrap();
    let renderer = svg_renderer(&out);

    for name in ["../escape", "sub/escape"] {
        let result = renderer.render(&storage_chain(name).unwrap());
        assert!(
            matches!(result, Err(VoldiagError::Configuration(_))),
            "{name}: {result:?}"
        );
    }
    assert!(!dir.path().join("escape.svg").exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
}

#[cfg(unix)]
#[test]
fn test_unwritable_output_dir_creates_nothing() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o555)).unwrap();

    // Permission bits do not bind a privileged user.
    if tempfile::NamedTempFile::new_in(dir.path()).is_ok() {
        fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o755)).unwrap();
        eprintln!("skipping: output directory is still writable");
        return;
    }

    let result = svg_renderer(dir.path()).render(&storage_chain("diagram").unwrap());
    let entries = fs::read_dir(dir.path()).unwrap().count();
    fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o755)).unwrap();

    assert!(matches!(result, Err(VoldiagError::Io(_))), "{result:?}");
    assert_eq!(entries, 0);
}

#[test]
fn test_failed_render_keeps_previous_file() {
    let mut builder = DiagramBuilder::new("diagram");
    let volume = builder.node(NodeKind::PersistentVolume, "alice-standard");
    let claim = builder.node(NodeKind::PersistentVolumeClaim, "alice-standard");
    builder.chain(&[volume, claim, volume]).unwrap();
    let cyclic = builder.build().unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("diagram.svg");
    fs::write(&path, "previous").unwrap();

    let result = svg_renderer(dir.path()).render(&cyclic);
    assert!(matches!(result, Err(VoldiagError::Layout(_))), "{result:?}");
    assert_eq!(fs::read_to_string(&path).unwrap(), "previous");
}

#[test]
fn test_edges_follow_declaration_order() {
    let mut builder = DiagramBuilder::new("diagram");
    let account = builder.node(NodeKind::StorageAccount, "standard");
    let pv = builder.node(NodeKind::PersistentVolume, "alice-standard");
    let pvc = builder.node(NodeKind::PersistentVolumeClaim, "alice-standard");
    builder.edge(account, pv).unwrap().edge(pv, pvc).unwrap();
    let diagram = builder.build().unwrap();

    assert_eq!(diagram, storage_chain("diagram").unwrap());
    let edges: Vec<_> = diagram
        .edges()
        .iter()
        .map(|edge| (edge.source(), edge.target()))
        .collect();
    assert_eq!(edges, vec![(account, pv), (pv, pvc)]);
}

#[test]
fn test_render_bytes_writes_nothing() {
    let dir = tempdir().unwrap();
    let bytes = svg_renderer(dir.path())
        .render_bytes(&storage_chain("diagram").unwrap())
        .unwrap();

    assert!(!bytes.is_empty());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_render_topology() {
    let dir = tempdir().unwrap();
    let topology = Topology::new(
        vec!["alice".into(), "bob".into()],
        vec![
            Instance::new("standard", false),
            Instance::new("standard-ro", true),
        ],
    )
    .with_access_modes(true);
    let diagram = topology.to_diagram("team").unwrap();

    let path = svg_renderer(dir.path()).render(&diagram).unwrap();
    let svg = fs::read_to_string(path).unwrap();
    assert!(svg.contains("bob-standard-ro"));
    assert!(svg.contains("ReadOnlyMany"));
}

#[cfg(feature = "graphviz")]
#[test]
fn test_render_dot_source() {
    let dir = tempdir().unwrap();
    let mut config = AppConfig::default();
    config.render_mut().set_backend(BackendKind::Dot);
    config.render_mut().set_output_dir(dir.path());

    let path = Renderer::new(config)
        .render(&storage_chain("diagram").unwrap())
        .unwrap();
    assert_eq!(path, dir.path().join("diagram.dot"));
    let dot = fs::read_to_string(path).unwrap();
    assert_eq!(dot.matches("->").count(), 2);
}
