use super::*;

fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    move |key: &str| {
        pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_owned())
    }
}

#[test]
fn normalizes_base() {
    assert_eq!(AssetPaths::new("").base(), "");
    assert_eq!(AssetPaths::new("/").base(), "");
    assert_eq!(AssetPaths::new("site").base(), "/site");
    assert_eq!(AssetPaths::new("/site/").base(), "/site");
}

#[test]
fn resolves_root_relative_paths() {
    let a = AssetPaths::new("/atwave-clone");
    assert_eq!(
        a.resolve("/images/work-01-saas.jpg"),
        "/atwave-clone/images/work-01-saas.jpg"
    );
    assert_eq!(a.resolve("hero-bg.mp4"), "/atwave-clone/hero-bg.mp4");
    assert_eq!(
        a.resolve("https://cdn.example.com/x.png"),
        "https://cdn.example.com/x.png"
    );
    assert_eq!(AssetPaths::default().resolve("/a.jpg"), "/a.jpg");
}

#[test]
fn repository_name_becomes_base() {
    assert_eq!(AssetPaths::from_repository("dfegarido/atwave-clone").base(), "/atwave-clone");
    assert_eq!(AssetPaths::from_repository("no-slash").base(), "");
    assert_eq!(AssetPaths::from_repository("owner/").base(), "");
}

#[test]
fn detection_order() {
    let both = env(&[(BASE_PATH_ENV, "/explicit-env"), (REPOSITORY_ENV, "o/repo")]);
    assert_eq!(AssetPaths::detect_with(Some("/cfg"), &both).base(), "/cfg");
    assert_eq!(AssetPaths::detect_with(None, &both).base(), "/explicit-env");

    let repo_only = env(&[(REPOSITORY_ENV, "o/repo")]);
    assert_eq!(AssetPaths::detect_with(None, repo_only).base(), "/repo");

    assert_eq!(AssetPaths::detect_with(None, env(&[])).base(), "");
}
