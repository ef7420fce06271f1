//! Reachability integration tests
//!
//! Each test lays out a small web project on disk, scans it and checks which
//! assets end up reported as unused.

use assetaudit::analysis::{find_unused, DetectorReport};
use assetaudit::{scan_project, AssetCategory, Config};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a project from (relative path, contents) pairs
fn project(files: &[(&str, &str)]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path().canonicalize().expect("Failed to canonicalize root");
    for (rel, contents) in files {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
    }
    (temp_dir, root)
}

fn unused_paths(root: &Path, categories: &[AssetCategory]) -> Vec<String> {
    let config = Config::default();
    let references = scan_project(&config, root, false).expect("Scan failed");
    find_unused(&config, root, &references, categories)
        .iter()
        .flat_map(|report: &DetectorReport| report.unused_items.iter().map(|r| r.path.clone()))
        .collect()
}

// ============================================================================
// Media matching
// ============================================================================

#[test]
fn test_src_attribute_keeps_image() {
    let (_dir, root) = project(&[
        ("src/App.tsx", r#"export const App = () => <img src="/images/hero/banner.png" />;"#),
        ("public/images/hero/banner.png", "png"),
        ("public/images/hero/unused.png", "png"),
    ]);

    let unused = unused_paths(&root, &[AssetCategory::Image]);
    assert_eq!(unused, vec!["public/images/hero/unused.png"]);
}

#[test]
fn test_each_reference_form_is_enough_alone() {
    let sources = [
        "import banner from './hero/banner.png';",
        r#"const a = <img src="banner.png" />;"#,
        r#"const a = <img src={"/images/hero/banner"} />;"#,
    ];

    for source in sources {
        let (_dir, root) = project(&[
            ("src/Hero.tsx", source),
            ("public/images/hero/banner.png", "png"),
        ]);
        assert!(
            unused_paths(&root, &[AssetCategory::Image]).is_empty(),
            "not matched by: {}",
            source
        );
    }
}

#[test]
fn test_bare_basename_matches() {
    let (_dir, root) = project(&[
        ("src/styles/site.css", ".hero { background: url('banner.png'); }"),
        ("public/images/hero/banner.png", "png"),
    ]);

    assert!(unused_paths(&root, &[AssetCategory::Image]).is_empty());
}

#[test]
fn test_same_basename_in_other_directory_is_unused() {
    let (_dir, root) = project(&[
        ("src/App.tsx", r#"const a = <img src="/images/hero/logo.png" />;"#),
        ("public/images/hero/logo.png", "png"),
        ("public/images/footer/logo.png", "png"),
    ]);

    let unused = unused_paths(&root, &[AssetCategory::Image]);
    assert_eq!(unused, vec!["public/images/footer/logo.png"]);
}

#[test]
fn test_query_string_and_case_are_ignored() {
    let (_dir, root) = project(&[
        ("src/App.tsx", r#"const a = <img src="/Images/Team/Anna.JPG?v=2" />;"#),
        ("public/images/team/anna.jpg", "jpg"),
    ]);

    assert!(unused_paths(&root, &[AssetCategory::Image]).is_empty());
}

#[test]
fn test_json_embedded_path_keeps_image() {
    let (_dir, root) = project(&[
        (
            "src/data/projects.json",
            r#"{"projects": [{"cover": "/apps/weather/cover.webp"}]}"#,
        ),
        ("public/apps/weather/cover.webp", "webp"),
        ("public/apps/weather/old.webp", "webp"),
    ]);

    let unused = unused_paths(&root, &[AssetCategory::Image]);
    assert_eq!(unused, vec!["public/apps/weather/old.webp"]);
}

#[test]
fn test_unreferenced_project_reports_every_image() {
    let (_dir, root) = project(&[
        ("src/App.tsx", "export const App = () => null;"),
        ("public/images/a.png", "a"),
        ("public/images/b.svg", "<svg/>"),
    ]);

    let unused = unused_paths(&root, &[AssetCategory::Image]);
    assert_eq!(unused, vec!["public/images/a.png", "public/images/b.svg"]);
}

// ============================================================================
// Module resolution
// ============================================================================

#[test]
fn test_dynamic_import_resolves_component() {
    let (_dir, root) = project(&[
        ("src/App.tsx", "import Home from './pages/Home';"),
        (
            "src/pages/Home.tsx",
            "const Card = React.lazy(() => import('../components/Card'));",
        ),
        ("src/components/Card.tsx", "export default function Card() {}"),
        ("src/components/Orphan.tsx", "export default function Orphan() {}"),
    ]);

    let unused = unused_paths(&root, &[AssetCategory::Component]);
    assert_eq!(unused, vec!["src/components/Orphan.tsx"]);
}

#[test]
fn test_directory_index_resolves() {
    let (_dir, root) = project(&[
        ("src/App.tsx", "import { Nav } from './components/nav';"),
        ("src/components/nav/index.ts", "export * from './Nav';"),
        ("src/components/nav/Nav.tsx", "export const Nav = () => null;"),
    ]);

    assert!(unused_paths(&root, &[AssetCategory::Component]).is_empty());
}

#[test]
fn test_package_import_never_matches() {
    let (_dir, root) = project(&[
        ("src/App.tsx", "import { Camera } from 'lucide-react';"),
        ("src/components/lucide-react.tsx", "export const Camera = 1;"),
    ]);

    let unused = unused_paths(&root, &[AssetCategory::Component]);
    assert_eq!(unused, vec!["src/components/lucide-react.tsx"]);
}

#[test]
fn test_animation_referenced_only_by_name_is_unused() {
    let (_dir, root) = project(&[
        ("src/App.tsx", "import { FadeIn } from './components/animations/FadeIn';\n// SlideUp"),
        ("src/components/animations/FadeIn.tsx", "export const FadeIn = 1;"),
        ("src/components/animations/SlideUp.tsx", "export const SlideUp = 1;"),
    ]);

    let unused = unused_paths(&root, &[AssetCategory::Animation]);
    assert_eq!(unused, vec!["src/components/animations/SlideUp.tsx"]);
}

#[test]
fn test_parallel_scan_agrees_with_sequential() {
    let (_dir, root) = project(&[
        ("src/App.tsx", r#"import Card from './components/Card'; const x = <img src="/images/a.png" />;"#),
        ("src/components/Card.tsx", "export default 1;"),
        ("src/components/Unused.tsx", "export default 2;"),
        ("public/images/a.png", "a"),
        ("public/images/b.png", "b"),
    ]);

    let config = Config::default();
    let sequential = scan_project(&config, &root, false).unwrap();
    let parallel = scan_project(&config, &root, true).unwrap();
    assert_eq!(sequential.len(), parallel.len());

    let categories = [AssetCategory::Image, AssetCategory::Component];
    let a = find_unused(&config, &root, &sequential, &categories);
    let b = find_unused(&config, &root, &parallel, &categories);
    assert_eq!(a, b);
}
