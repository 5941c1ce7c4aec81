// Spot checks of the built-in ladder against its declared history

use buildcompat::prelude::*;
use buildcompat::table;

fn v(text: &str) -> VersionSpec {
    text.parse().expect("test version should parse")
}

#[test]
fn test_oldest_supported_version() {
    assert_eq!(table::min_version(), &v("5.0.0"));
}

#[test]
fn test_root_profile_defaults() -> CompatResult<()> {
    let profile = table::resolve(&v("5.0.0"))?;
    assert!(!profile.supports_licenses());
    assert!(!profile.supports_repositories());
    assert_eq!(profile.license_attribute(), "licence");
    assert_eq!(profile.style_checker_version(), "6.0");
    assert_eq!(profile.static_analysis_tool_version(), "3.0.0");
    assert_eq!(profile.output_root_subdir(), "");
    assert!(profile.supported_maven_metadata().is_empty());
    assert!(profile.overwrite_project_attributes());
    assert!(profile.suite_import_git_bref());
    Ok(())
}

#[test]
fn test_pre_license_versions_resolve_to_root() -> CompatResult<()> {
    let profile = table::resolve(&v("5.1.9"))?;
    assert_eq!(profile.introduced_at(), &v("5.0.0"));
    assert!(!profile.supports_licenses());
    Ok(())
}

#[test]
fn test_license_support_lands_at_5_2_0() -> CompatResult<()> {
    let profile = table::resolve(&v("5.2.0"))?;
    assert!(profile.supports_licenses());
    assert_eq!(
        profile.supported_maven_metadata(),
        [
            "library-coordinates",
            "suite-url",
            "suite-developer",
            "dist-description",
        ]
    );
    // the attribute rename only lands two rungs later
    assert_eq!(profile.license_attribute(), "licence");
    Ok(())
}

#[test]
fn test_attribute_spelling_fixed_at_5_2_2() -> CompatResult<()> {
    let profile = table::resolve(&v("5.2.2"))?;
    assert_eq!(profile.license_attribute(), "license");
    assert_eq!(profile.licenses_attribute(), "licenses");
    assert_eq!(profile.default_license_attribute(), "defaultLicense");
    Ok(())
}

#[test]
fn test_style_checker_bumped_at_5_6_16() -> CompatResult<()> {
    assert_eq!(table::resolve(&v("5.6.15"))?.style_checker_version(), "6.0");
    assert_eq!(table::resolve(&v("5.6.16"))?.style_checker_version(), "6.15");
    Ok(())
}

#[test]
fn test_attribute_overwrite_disabled_at_5_124_7() -> CompatResult<()> {
    assert!(table::resolve(&v("5.124.6"))?.overwrite_project_attributes());
    assert!(!table::resolve(&v("5.124.7"))?.overwrite_project_attributes());
    Ok(())
}

#[test]
fn test_git_bref_imports_withdrawn_at_5_138_0() -> CompatResult<()> {
    assert!(table::resolve(&v("5.137.9"))?.suite_import_git_bref());
    assert!(!table::resolve(&v("5.138.0"))?.suite_import_git_bref());
    Ok(())
}

#[test]
fn test_newest_rung_accumulates_everything() -> CompatResult<()> {
    let profile = table::resolve(&v("999.0.0"))?;
    assert_eq!(profile.introduced_at(), &v("5.210.2"));
    assert_eq!(profile.static_analysis_tool_version(), "3.1.11");
    assert!(profile.maven_supports_classifier());
    assert!(profile.verify_multirelease_projects());
    assert!(profile.check_package_locations());
    assert!(profile.supports_licenses(), "early flips still hold");
    assert_eq!(profile.since_verification_args(), ["-verifysincepresent"]);
    Ok(())
}

#[test]
fn test_prehistoric_version_is_unsupported() {
    let result = table::resolve(&v("4.9.0"));
    assert_eq!(
        result,
        Err(CompatError::UnsupportedVersion {
            requested: v("4.9.0"),
            minimum: v("5.0.0"),
        })
    );
}

#[test]
fn test_ladder_rungs_resolve_to_themselves() -> CompatResult<()> {
    let built = default_table()?;
    for profile in built.profiles() {
        let resolved = built.resolve(profile.introduced_at())?;
        assert_eq!(resolved.name(), profile.name());
    }
    Ok(())
}
