/// Root-relative path fragments that no cleanup may ever remove
pub const WHITELIST: &[&str] = &[
    "src/main.tsx",
    "src/App.tsx",
    "src/router/AppRouter.tsx",
    "public/sw.js",
    "package.json",
    "package-lock.json",
    "tsconfig.json",
    ".gitignore",
];

/// Whether a root-relative path contains any whitelisted fragment
pub fn is_whitelisted(relative: &str) -> bool {
    let normalized = relative.replace('\\', "/").to_lowercase();
    let normalized = normalized.trim_start_matches("./");
    WHITELIST
        .iter()
        .any(|fragment| normalized.contains(&fragment.to_lowercase()))
}
