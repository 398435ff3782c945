//! Exclusion pattern compilation.
//!
//! Builds one matcher from a static list of known dependency-lock filenames
//! plus free-form regular-expression fragments. Compilation happens once at
//! startup; a malformed fragment is a configuration error, never a
//! request-time failure.

use regex::Regex;

use crate::error::TriageError;

/// Dependency-lock filenames across platform package managers. Matched
/// literally (metacharacters escaped before compilation).
pub const LOCK_FILES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "npm-shrinkwrap.json",
    "Pipfile.lock",
    "poetry.lock",
    "conda-lock.yml",
    "Gemfile.lock",
    "composer.lock",
    "packages.lock.json",
    "project.assets.json",
    "pom.xml",
    "Cargo.lock",
    "mix.lock",
    "pubspec.lock",
    "go.sum",
    "stack.yaml.lock",
    "vcpkg.json",
    "conan.lock",
    "ivy.xml",
    "project.clj",
    "Podfile.lock",
    "Cartfile.resolved",
    "flake.lock",
    "pnpm-lock.yaml",
];

/// Free-form exclusion fragments, used verbatim: binary/document extensions,
/// lockfile naming variants, generated bundle directories, CI config.
pub const EXCLUDE_EXPRESSIONS: &[&str] = &[
    r".*\.(ini|csv|xls|xlsx|xlr|doc|docx|txt|pps|ppt|pptx|dot|dotx|log|tar|rtf|dat|ipynb|po|profile|object|obj|dxf|twb|bcsymbolmap|tfstate|pdf|rbi|pem|crt|svg|png|jpeg|jpg|ttf)$",
    r".*(package-lock|packages\.lock|package)\.json$",
    r".*(yarn|gemfile|podfile|cargo|composer|pipfile|gopkg)\.lock$",
    r".*gradle\.lockfile$",
    r".*lock\.sbt$",
    r".*dist/.*\.js",
    r".*public/assets/.*\.js",
    r".*ci\.yml$",
];

/// Compiled exclusion matcher recognizing files considered noise for review
/// purposes (lock files, generated bundles, binary/document formats).
///
/// Construct once at process initialization and share by reference; matching
/// is read-only and safe for unsynchronized concurrent use.
#[derive(Debug, Clone)]
pub struct ExclusionMatcher {
    pattern: Regex,
}

impl ExclusionMatcher {
    /// Compiles a matcher from literal filenames and verbatim regex fragments.
    ///
    /// Literal filenames are escaped so metacharacters match literally;
    /// fragments are joined with alternation into a single pattern.
    pub fn from_rules(lock_files: &[&str], expressions: &[&str]) -> Result<Self, TriageError> {
        let fragments: Vec<String> = lock_files
            .iter()
            .map(|file| regex::escape(file))
            .chain(expressions.iter().map(|expr| (*expr).to_string()))
            .collect();

        let pattern = Regex::new(&fragments.join("|"))
            .map_err(|e| TriageError::InvalidExclusionPattern(e.to_string()))?;

        Ok(Self { pattern })
    }

    /// Compiles the built-in exclusion rules.
    pub fn builtin() -> Result<Self, TriageError> {
        Self::from_rules(LOCK_FILES, EXCLUDE_EXPRESSIONS)
    }

    /// Returns true when the path matches any exclusion rule.
    /// Case-sensitive, unanchored except where a fragment anchors itself.
    pub fn is_match(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> ExclusionMatcher {
        ExclusionMatcher::builtin().unwrap()
    }

    // ── literal lock files ─────────────────────────────────────────

    #[test]
    fn matches_every_builtin_lock_file() {
        let matcher = builtin();
        for file in LOCK_FILES {
            assert!(matcher.is_match(file), "{file} should match");
        }
    }

    #[test]
    fn literal_dot_is_not_a_wildcard() {
        // "goXsum" would match an unescaped "go.sum" fragment
        let matcher = ExclusionMatcher::from_rules(&["go.sum"], &[]).unwrap();
        assert!(matcher.is_match("go.sum"));
        assert!(!matcher.is_match("goXsum"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let matcher = builtin();
        assert!(matcher.is_match("Cargo.lock"));
        assert!(!matcher.is_match("cargo.Lock"));
    }

    // ── free-form fragments ────────────────────────────────────────

    #[test]
    fn matches_binary_and_document_extensions() {
        let matcher = builtin();
        for path in [
            "docs/report.pdf",
            "assets/logo.svg",
            "img/photo.jpeg",
            "notes.txt",
            "state.tfstate",
            "certs/server.pem",
        ] {
            assert!(matcher.is_match(path), "{path} should match");
        }
    }

    #[test]
    fn extension_fragments_are_suffix_anchored() {
        let matcher = builtin();
        assert!(!matcher.is_match("src/pdf_renderer.rs"));
        assert!(!matcher.is_match("report.pdf.asc"));
    }

    #[test]
    fn matches_generated_bundle_paths() {
        let matcher = builtin();
        assert!(matcher.is_match("build/dist/app.min.js"));
        assert!(matcher.is_match("public/assets/vendor.js"));
        assert!(!matcher.is_match("src/app.js"));
    }

    #[test]
    fn matches_nested_lockfile_variants() {
        let matcher = builtin();
        assert!(matcher.is_match("services/api/yarn.lock"));
        assert!(matcher.is_match("gradle.lockfile"));
        assert!(matcher.is_match(".github/workflows/ci.yml"));
    }

    #[test]
    fn plain_source_paths_do_not_match() {
        let matcher = builtin();
        for path in ["src/main.rs", "lib/parser.py", "cmd/server/main.go"] {
            assert!(!matcher.is_match(path), "{path} should not match");
        }
    }

    // ── compilation errors ─────────────────────────────────────────

    #[test]
    fn invalid_fragment_fails_at_compile_time() {
        let result = ExclusionMatcher::from_rules(&[], &["*broken["]);
        assert!(matches!(
            result,
            Err(TriageError::InvalidExclusionPattern(_))
        ));
    }

    #[test]
    fn builtin_rules_always_compile() {
        assert!(ExclusionMatcher::builtin().is_ok());
    }
}
