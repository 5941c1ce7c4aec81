//! Capability flags and the immutable profiles that bundle them.
//!
//! A [`CompatibilityProfile`] is a named, fully-resolved snapshot of every
//! recognized [`Flag`] as of one "introduced at" version. Profiles are built
//! by the chain module: the root profile seeds every flag at its hard-coded
//! default, and each later profile clones its predecessor's flag map and
//! applies a sparse override set. Consumers only ever read the typed
//! accessors; profiles are never mutated after construction.

use std::collections::BTreeMap;

use derive_more::From;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};

use crate::version::VersionSpec;

/// Every capability flag the resolver knows about.
///
/// Each flag has a documented default in the root profile; later profiles
/// may only override a value, never introduce a new name (the enum makes
/// undeclared names unrepresentable).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    AsRefStr,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    /// Whether suite metadata may declare licenses at all.
    SupportsLicenses,
    /// Canonical spelling of the per-component license attribute.
    LicenseAttribute,
    /// Canonical spelling of the license-list attribute.
    LicensesAttribute,
    /// Canonical spelling of the suite-wide default-license attribute.
    DefaultLicenseAttribute,
    /// Maven metadata sections the deploy step is allowed to emit.
    SupportedMavenMetadata,
    /// Whether suite metadata may declare publishing repositories.
    SupportsRepositories,
    /// Determines if the newest-input passed to a build task is a timestamp
    /// file handle or a plain modification time.
    NewestInputIsTimestampFile,
    /// Subdirectory under the suite directory that holds build output; empty
    /// means output lands in the suite directory itself.
    OutputRootSubdir,
    MavenDeployJavadoc,
    /// Whether Maven deployment understands artifact classifiers.
    MavenSupportsClassifier,
    /// Version of the style checker fetched for `checkstyle`-style runs.
    StyleCheckerVersion,
    /// Requires a project to have a Java compliance level no lower than any
    /// project it depends on.
    CheckDependencyJavaCompliance,
    ImprovedImportMatching,
    /// Extra arguments passed to the API-metadata checker.
    SinceVerificationArgs,
    /// Determines if the constituents of a module derived from a distribution
    /// are exactly the constituents of the distribution.
    ModuleDepsEqualDistDeps,
    /// Determines if unit testing consumes jars from distributions instead of
    /// raw class directories.
    UseDistsForUnittest,
    /// Excludes a historically misspelled debugging class name from packaging.
    ExcludeDisableJavaDebugging,
    /// Makes lint input paths discovered from version control absolute.
    LintInputsAbsolute,
    /// Requires that test projects are only imported by other test projects.
    RestrictTestProjectImports,
    /// Passes a parallel-jobs option to `make` unless a project opts out.
    ParallelMakeByDefault,
    /// Attributes from suite metadata that are not explicitly handled
    /// overwrite values set by the constructor.
    OverwriteProjectAttributes,
    /// Requires suite metadata to survive a JSON round trip.
    RequireJsonifiableSuite,
    /// Whether suite imports may pin a git bref instead of a full revision.
    SuiteImportGitBref,
    EnforceTestDistributions,
    DeprecateIsTestProject,
    /// Should static-analysis project selection skip projects whose Java
    /// compliance is above 8.
    FilterStaticAnalysisByCompliance,
    VersionSuffixOnExplicitVersion,
    /// Should jar distributions discriminate build artifacts by the JDK used,
    /// avoiding collisions across JAVA_HOME settings.
    JarsUseJdkDiscriminant,
    /// Should canonicalization check that package declarations match source
    /// locations on disk.
    CheckPackageLocations,
    /// Should the style-checker configuration of a project be sanity checked.
    CheckStyleConfigSanity,
    /// Should multi-release projects be verified.
    VerifyMultireleaseProjects,
    /// Version of the static-analysis (bug-finder) tool to use.
    StaticAnalysisToolVersion,
}

impl Flag {
    /// Hard-coded default value in the root profile.
    pub fn default_value(self) -> FlagValue {
        match self {
            Flag::SupportsLicenses => false.into(),
            Flag::LicenseAttribute => "licence".into(),
            Flag::LicensesAttribute => "licences".into(),
            Flag::DefaultLicenseAttribute => "defaultLicence".into(),
            Flag::SupportedMavenMetadata => FlagValue::List(Vec::new()),
            Flag::SupportsRepositories => false.into(),
            Flag::NewestInputIsTimestampFile => false.into(),
            Flag::OutputRootSubdir => "".into(),
            Flag::MavenDeployJavadoc => false.into(),
            Flag::MavenSupportsClassifier => false.into(),
            Flag::StyleCheckerVersion => "6.0".into(),
            Flag::CheckDependencyJavaCompliance => false.into(),
            Flag::ImprovedImportMatching => false.into(),
            Flag::SinceVerificationArgs => FlagValue::List(Vec::new()),
            Flag::ModuleDepsEqualDistDeps => false.into(),
            Flag::UseDistsForUnittest => false.into(),
            Flag::ExcludeDisableJavaDebugging => false.into(),
            Flag::LintInputsAbsolute => false.into(),
            Flag::RestrictTestProjectImports => false.into(),
            Flag::ParallelMakeByDefault => false.into(),
            Flag::OverwriteProjectAttributes => true.into(),
            Flag::RequireJsonifiableSuite => false.into(),
            Flag::SuiteImportGitBref => true.into(),
            Flag::EnforceTestDistributions => false.into(),
            Flag::DeprecateIsTestProject => false.into(),
            Flag::FilterStaticAnalysisByCompliance => false.into(),
            Flag::VersionSuffixOnExplicitVersion => false.into(),
            Flag::JarsUseJdkDiscriminant => false.into(),
            Flag::CheckPackageLocations => false.into(),
            Flag::CheckStyleConfigSanity => false.into(),
            Flag::VerifyMultireleaseProjects => false.into(),
            Flag::StaticAnalysisToolVersion => "3.0.0".into(),
        }
    }
}

/// The value carried by a single capability flag.
#[derive(Debug, Clone, PartialEq, Eq, From, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagValue {
    Bool(bool),
    Str(String),
    List(Vec<String>),
}

impl From<&str> for FlagValue {
    fn from(value: &str) -> Self {
        FlagValue::Str(value.to_string())
    }
}

impl FlagValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FlagValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FlagValue::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FlagValue::List(values) => Some(values),
            _ => None,
        }
    }
}

/// An immutable named bundle of capability-flag values, effective from its
/// `introduced_at` version onward until overridden by a later profile.
///
/// # Examples
///
/// ```
/// use buildcompat::prelude::*;
///
/// let table = CompatibilityTable::shared();
/// let profile = table.resolve(&"5.2.2".parse()?)?;
///
/// assert!(profile.supports_licenses());
/// assert_eq!(profile.license_attribute(), "license");
/// # Ok::<(), buildcompat::error::CompatError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityProfile {
    name: String,
    introduced_at: VersionSpec,
    flags: BTreeMap<Flag, FlagValue>,
}

impl CompatibilityProfile {
    /// Build the root profile: every flag present at its hard-coded default,
    /// then the given overrides applied on top.
    pub(crate) fn root(
        name: String,
        introduced_at: VersionSpec,
        overrides: BTreeMap<Flag, FlagValue>,
    ) -> Self {
        let mut flags: BTreeMap<Flag, FlagValue> = Flag::iter()
            .map(|flag| (flag, flag.default_value()))
            .collect();
        flags.extend(overrides);
        Self {
            name,
            introduced_at,
            flags,
        }
    }

    /// Derive a profile from its predecessor: clone the predecessor's flag
    /// map and apply the sparse overrides. Unmentioned flags inherit the
    /// predecessor's current value unchanged.
    pub(crate) fn derived(
        name: String,
        introduced_at: VersionSpec,
        parent: &CompatibilityProfile,
        overrides: BTreeMap<Flag, FlagValue>,
    ) -> Self {
        let mut flags = parent.flags.clone();
        flags.extend(overrides);
        Self {
            name,
            introduced_at,
            flags,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The version at which this profile's values take effect.
    pub fn introduced_at(&self) -> &VersionSpec {
        &self.introduced_at
    }

    /// The effective value of a single flag.
    pub fn flag(&self, flag: Flag) -> FlagValue {
        self.flags
            .get(&flag)
            .cloned()
            .unwrap_or_else(|| flag.default_value())
    }

    /// All flags with their effective values, in `Flag` order.
    pub fn flags(&self) -> impl Iterator<Item = (Flag, &FlagValue)> {
        self.flags.iter().map(|(flag, value)| (*flag, value))
    }

    fn bool_flag(&self, flag: Flag) -> bool {
        match self.flags.get(&flag) {
            Some(FlagValue::Bool(value)) => *value,
            _ => flag.default_value().as_bool().unwrap_or(false),
        }
    }

    fn str_flag(&self, flag: Flag) -> String {
        match self.flags.get(&flag) {
            Some(FlagValue::Str(value)) => value.clone(),
            _ => match flag.default_value() {
                FlagValue::Str(value) => value,
                _ => String::new(),
            },
        }
    }

    fn list_flag(&self, flag: Flag) -> Vec<String> {
        match self.flags.get(&flag) {
            Some(FlagValue::List(values)) => values.clone(),
            _ => match flag.default_value() {
                FlagValue::List(values) => values,
                _ => Vec::new(),
            },
        }
    }

    pub fn supports_licenses(&self) -> bool {
        self.bool_flag(Flag::SupportsLicenses)
    }

    pub fn license_attribute(&self) -> String {
        self.str_flag(Flag::LicenseAttribute)
    }

    pub fn licenses_attribute(&self) -> String {
        self.str_flag(Flag::LicensesAttribute)
    }

    pub fn default_license_attribute(&self) -> String {
        self.str_flag(Flag::DefaultLicenseAttribute)
    }

    pub fn supported_maven_metadata(&self) -> Vec<String> {
        self.list_flag(Flag::SupportedMavenMetadata)
    }

    pub fn supports_repositories(&self) -> bool {
        self.bool_flag(Flag::SupportsRepositories)
    }

    /// Determines if the newest-input parameter of a build task is a
    /// timestamp file handle or a plain modification time.
    pub fn newest_input_is_timestamp_file(&self) -> bool {
        self.bool_flag(Flag::NewestInputIsTimestampFile)
    }

    /// Subdirectory of the suite directory holding build output; empty means
    /// the suite directory itself.
    pub fn output_root_subdir(&self) -> String {
        self.str_flag(Flag::OutputRootSubdir)
    }

    pub fn maven_deploy_javadoc(&self) -> bool {
        self.bool_flag(Flag::MavenDeployJavadoc)
    }

    pub fn maven_supports_classifier(&self) -> bool {
        self.bool_flag(Flag::MavenSupportsClassifier)
    }

    pub fn style_checker_version(&self) -> String {
        self.str_flag(Flag::StyleCheckerVersion)
    }

    /// Determines if a project must have a Java compliance level no lower
    /// than the projects it depends on.
    pub fn check_dependency_java_compliance(&self) -> bool {
        self.bool_flag(Flag::CheckDependencyJavaCompliance)
    }

    pub fn improved_import_matching(&self) -> bool {
        self.bool_flag(Flag::ImprovedImportMatching)
    }

    pub fn since_verification_args(&self) -> Vec<String> {
        self.list_flag(Flag::SinceVerificationArgs)
    }

    /// Determines if the constituents of a module derived from a distribution
    /// are exactly the constituents of the distribution.
    pub fn module_deps_equal_dist_deps(&self) -> bool {
        self.bool_flag(Flag::ModuleDepsEqualDistDeps)
    }

    /// Determines if unit testing uses jars from distributions.
    pub fn use_dists_for_unittest(&self) -> bool {
        self.bool_flag(Flag::UseDistsForUnittest)
    }

    pub fn exclude_disable_java_debugging(&self) -> bool {
        self.bool_flag(Flag::ExcludeDisableJavaDebugging)
    }

    pub fn lint_inputs_absolute(&self) -> bool {
        self.bool_flag(Flag::LintInputsAbsolute)
    }

    /// Requires that test projects can only be imported by test projects.
    pub fn restrict_test_project_imports(&self) -> bool {
        self.bool_flag(Flag::RestrictTestProjectImports)
    }

    /// Uses a parallel-jobs option for `make` by default; projects can still
    /// opt out individually.
    pub fn parallel_make_by_default(&self) -> bool {
        self.bool_flag(Flag::ParallelMakeByDefault)
    }

    /// Attributes from suite metadata that are not explicitly handled
    /// overwrite values set by the constructor.
    pub fn overwrite_project_attributes(&self) -> bool {
        self.bool_flag(Flag::OverwriteProjectAttributes)
    }

    pub fn require_jsonifiable_suite(&self) -> bool {
        self.bool_flag(Flag::RequireJsonifiableSuite)
    }

    pub fn suite_import_git_bref(&self) -> bool {
        self.bool_flag(Flag::SuiteImportGitBref)
    }

    pub fn enforce_test_distributions(&self) -> bool {
        self.bool_flag(Flag::EnforceTestDistributions)
    }

    pub fn deprecate_is_test_project(&self) -> bool {
        self.bool_flag(Flag::DeprecateIsTestProject)
    }

    /// Should static-analysis project selection filter out projects whose
    /// Java compliance is greater than 8.
    pub fn filter_static_analysis_by_compliance(&self) -> bool {
        self.bool_flag(Flag::FilterStaticAnalysisByCompliance)
    }

    pub fn version_suffix_on_explicit_version(&self) -> bool {
        self.bool_flag(Flag::VersionSuffixOnExplicitVersion)
    }

    /// Should jar distributions use the build JDK as an extra artifact
    /// discriminant to avoid collisions across JAVA_HOME settings.
    pub fn jars_use_jdk_discriminant(&self) -> bool {
        self.bool_flag(Flag::JarsUseJdkDiscriminant)
    }

    /// Should canonicalization check that package declarations and source
    /// locations match.
    pub fn check_package_locations(&self) -> bool {
        self.bool_flag(Flag::CheckPackageLocations)
    }

    /// Should the style-checker configuration of a project be sanity checked.
    pub fn check_style_config_sanity(&self) -> bool {
        self.bool_flag(Flag::CheckStyleConfigSanity)
    }

    pub fn verify_multirelease_projects(&self) -> bool {
        self.bool_flag(Flag::VerifyMultireleaseProjects)
    }

    /// Which version of the static-analysis tool should be used.
    pub fn static_analysis_tool_version(&self) -> String {
        self.str_flag(Flag::StaticAnalysisToolVersion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(text: &str) -> VersionSpec {
        text.parse().expect("test version should parse")
    }

    #[test]
    fn test_root_profile_carries_every_flag() {
        let root = CompatibilityProfile::root(
            "base".to_string(),
            version("5.0.0"),
            BTreeMap::new(),
        );
        for flag in Flag::iter() {
            assert_eq!(
                root.flag(flag),
                flag.default_value(),
                "root value for {flag} should be the documented default"
            );
        }
    }

    #[test]
    fn test_derived_profile_inherits_unmentioned_flags() {
        let root = CompatibilityProfile::root(
            "base".to_string(),
            version("5.0.0"),
            BTreeMap::new(),
        );
        let mut overrides = BTreeMap::new();
        overrides.insert(Flag::SupportsLicenses, true.into());
        let child = CompatibilityProfile::derived(
            "licensed".to_string(),
            version("5.2.0"),
            &root,
            overrides,
        );

        assert!(child.supports_licenses());
        // everything else untouched
        assert_eq!(child.license_attribute(), "licence");
        assert_eq!(child.style_checker_version(), "6.0");
        assert!(child.overwrite_project_attributes());
    }

    #[test]
    fn test_override_replaces_string_and_list_values() {
        let root = CompatibilityProfile::root(
            "base".to_string(),
            version("5.0.0"),
            BTreeMap::new(),
        );
        let mut overrides = BTreeMap::new();
        overrides.insert(Flag::LicenseAttribute, "license".into());
        overrides.insert(
            Flag::SinceVerificationArgs,
            FlagValue::List(vec!["-verifysincepresent".to_string()]),
        );
        let child = CompatibilityProfile::derived(
            "renamed".to_string(),
            version("5.2.2"),
            &root,
            overrides,
        );

        assert_eq!(child.license_attribute(), "license");
        assert_eq!(child.since_verification_args(), ["-verifysincepresent"]);
    }

    #[test]
    fn test_flag_value_conversions() {
        assert_eq!(FlagValue::from(true).as_bool(), Some(true));
        assert_eq!(FlagValue::from("6.15").as_str(), Some("6.15"));
        assert_eq!(FlagValue::from(true).as_str(), None);
        let list = FlagValue::List(vec!["a".to_string()]);
        assert_eq!(list.as_list().map(<[String]>::len), Some(1));
    }
}
