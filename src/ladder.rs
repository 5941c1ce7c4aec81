//! The built-in compatibility ladder.
//!
//! One statically declared, append-only list of rungs: each rung names the
//! tool version at which its overrides took effect. New behavior changes are
//! added by appending a step with a strictly greater version; existing rungs
//! are never edited, so projects pinned to an older minimum version keep the
//! behavior they declared.

use crate::chain::{ChainBuilder, ProfileChain};
use crate::error::CompatResult;
use crate::profile::{Flag, FlagValue};
use crate::table::CompatibilityTable;
use crate::version::VersionSpec;

fn rung(components: [u64; 3]) -> VersionSpec {
    VersionSpec::from_components(components.to_vec())
}

fn list(values: &[&str]) -> FlagValue {
    FlagValue::List(values.iter().map(|value| (*value).to_string()).collect())
}

/// The full declared history of default-behavior changes.
pub fn default_chain() -> CompatResult<ProfileChain> {
    ChainBuilder::new()
        .step(rung([5, 0, 0]), [])
        .step(
            rung([5, 2, 0]),
            [
                (Flag::SupportsLicenses, true.into()),
                (
                    Flag::SupportedMavenMetadata,
                    list(&[
                        "library-coordinates",
                        "suite-url",
                        "suite-developer",
                        "dist-description",
                    ]),
                ),
            ],
        )
        .step(rung([5, 2, 1]), [(Flag::SupportsRepositories, true.into())])
        .step(
            rung([5, 2, 2]),
            [
                (Flag::LicenseAttribute, "license".into()),
                (Flag::LicensesAttribute, "licenses".into()),
                (Flag::DefaultLicenseAttribute, "defaultLicense".into()),
            ],
        )
        .step(
            rung([5, 3, 3]),
            [(Flag::NewestInputIsTimestampFile, true.into())],
        )
        .step(rung([5, 5, 5]), [(Flag::OutputRootSubdir, "mxbuild".into())])
        .step(rung([5, 6, 6]), [(Flag::MavenDeployJavadoc, true.into())])
        .step(rung([5, 6, 16]), [(Flag::StyleCheckerVersion, "6.15".into())])
        .step(
            rung([5, 9, 0]),
            [(Flag::SinceVerificationArgs, list(&["-verifysincepresent"]))],
        )
        .step(
            rung([5, 20, 0]),
            [
                (Flag::CheckDependencyJavaCompliance, true.into()),
                (Flag::ImprovedImportMatching, true.into()),
            ],
        )
        .step(
            rung([5, 34, 4]),
            [(Flag::ModuleDepsEqualDistDeps, true.into())],
        )
        .step(rung([5, 59, 0]), [(Flag::UseDistsForUnittest, true.into())])
        .step(
            rung([5, 68, 0]),
            [(Flag::ExcludeDisableJavaDebugging, true.into())],
        )
        .step(rung([5, 110, 4]), [(Flag::LintInputsAbsolute, true.into())])
        .step(
            rung([5, 113, 0]),
            [(Flag::RestrictTestProjectImports, true.into())],
        )
        .step(
            rung([5, 115, 0]),
            [(Flag::ParallelMakeByDefault, true.into())],
        )
        .step(
            rung([5, 124, 7]),
            [(Flag::OverwriteProjectAttributes, false.into())],
        )
        .step(
            rung([5, 133, 0]),
            [(Flag::RequireJsonifiableSuite, true.into())],
        )
        .step(rung([5, 138, 0]), [(Flag::SuiteImportGitBref, false.into())])
        .step(
            rung([5, 140, 0]),
            [
                (Flag::EnforceTestDistributions, true.into()),
                (Flag::DeprecateIsTestProject, true.into()),
            ],
        )
        .step(
            rung([5, 149, 2]),
            [(Flag::FilterStaticAnalysisByCompliance, true.into())],
        )
        .step(
            rung([5, 176, 0]),
            [(Flag::VersionSuffixOnExplicitVersion, true.into())],
        )
        .step(
            rung([5, 181, 0]),
            [(Flag::JarsUseJdkDiscriminant, true.into())],
        )
        .step(
            rung([5, 194, 0]),
            [(Flag::CheckPackageLocations, true.into())],
        )
        .step(
            rung([5, 195, 0]),
            [(Flag::MavenSupportsClassifier, true.into())],
        )
        .step(
            rung([5, 195, 1]),
            [(Flag::CheckStyleConfigSanity, true.into())],
        )
        .step(
            rung([5, 206, 1]),
            [(Flag::VerifyMultireleaseProjects, true.into())],
        )
        .step(
            rung([5, 210, 2]),
            [(Flag::StaticAnalysisToolVersion, "3.1.11".into())],
        )
        .build()
}

/// Build a fresh table from the built-in ladder.
pub fn default_table() -> CompatResult<CompatibilityTable> {
    CompatibilityTable::build(default_chain()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ladder_validates() {
        let chain = default_chain().expect("built-in ladder should validate");
        assert_eq!(chain.len(), 28);
    }

    #[test]
    fn test_builtin_ladder_versions_strictly_increase() {
        let chain = default_chain().expect("built-in ladder should validate");
        let versions: Vec<&VersionSpec> = chain
            .profiles()
            .map(|profile| profile.introduced_at())
            .collect();
        for pair in versions.windows(2) {
            assert!(pair[0] < pair[1], "{} should precede {}", pair[0], pair[1]);
        }
    }
}
