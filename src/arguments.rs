use clap::{Parser, ValueEnum};

use crate::{DEFAULT_INDEX_URL, DEFAULT_MANIFEST, MAIN_PACKAGE};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Default)]
pub enum VersionOrdering {
    /// Plain string comparison of the version identifiers
    #[default]
    Lexical,
    /// Semantic version comparison; entries that are not semver are skipped
    Semver,
}

#[derive(Debug, Parser)]
#[command(author, version, about, bin_name = "pyrust-release")]
pub struct Arguments {
    #[arg(long, short, default_value = "./")]
    pub path: String,
    #[arg(long, short, default_value = DEFAULT_MANIFEST)]
    pub manifest: String,
    /// Upstream package to follow and pin in the manifest
    #[arg(long, default_value = MAIN_PACKAGE)]
    pub package: String,
    #[arg(long, default_value = DEFAULT_INDEX_URL)]
    pub index_url: String,
    #[arg(long, short, value_enum, ignore_case = true, default_value_t = VersionOrdering::Lexical)]
    pub ordering: VersionOrdering,
    /// Only list the versions that would be released
    #[arg(long, short = 'n')]
    pub dry_run: bool,
    #[arg(long, short)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let args = Arguments::parse_from(["pyrust-release"]);
        assert_eq!(args.path, "./");
        assert_eq!(args.manifest, "pyproject.toml");
        assert_eq!(args.package, "pyrust-task-id");
        assert_eq!(args.index_url, "https://pypi.org/pypi");
        assert_eq!(args.ordering, VersionOrdering::Lexical);
        assert!(!args.dry_run);
        assert!(!args.verbose);
    }

    #[test]
    fn test_parse_ordering_case_insensitive() {
        let args = Arguments::parse_from(["pyrust-release", "-o", "SEMVER"]);
        assert_eq!(args.ordering, VersionOrdering::Semver);

        let args = Arguments::parse_from(["pyrust-release", "--ordering", "lexical"]);
        assert_eq!(args.ordering, VersionOrdering::Lexical);
    }

    #[test]
    fn test_parse_dry_run() {
        let args = Arguments::parse_from(["pyrust-release", "-n"]);
        assert!(args.dry_run);
    }

    #[test]
    fn test_parse_long_flags() {
        let args = Arguments::parse_from([
            "pyrust-release",
            "--path",
            "/test",
            "--manifest",
            "other.toml",
            "--package",
            "some-package",
            "--index-url",
            "http://localhost:8080/pypi",
            "--verbose",
        ]);
        assert_eq!(args.path, "/test");
        assert_eq!(args.manifest, "other.toml");
        assert_eq!(args.package, "some-package");
        assert_eq!(args.index_url, "http://localhost:8080/pypi");
        assert!(args.verbose);
    }

    #[test]
    fn test_rejects_positional_arguments() {
        let result = Arguments::try_parse_from(["pyrust-release", "1.2.3"]);
        assert!(result.is_err());
    }
}
