//! Catalog Fixture Tests
//!
//! Formats whole code.json documents of every schema family and checks the
//! canonical output.

use serde_json::{json, Value};

use codegov_metadata::formatter::CanonicalRepository;
use codegov_metadata::{
    get_code_json_repos, get_code_json_version, get_flattened_mapping_properties,
    get_flattened_mapping_properties_by_type, is_valid_repository_url, parse_catalog,
    parse_github_url, remove_dupes, FieldWeights, LogSerializers, MetadataError, RepoFormatter,
    SchemaFamily,
};

fn fixture(text: &str) -> Value {
    parse_catalog(text).unwrap()
}

fn keys(value: &Value) -> Vec<&str> {
    value.as_object().unwrap().keys().map(String::as_str).collect()
}

// =============================================================================
// 2.0.0 Catalogs
// =============================================================================

#[test]
fn test_v2_catalog_formats_releases() {
    let doc = fixture(include_str!("fixtures/code_json_v2.json"));
    let report = RepoFormatter::default().format_catalog(&doc).unwrap();

    assert_eq!(report.version, "2.0.0");
    assert_eq!(report.repos.len(), 2);
    assert_eq!(report.failures.len(), 1);

    let ids: Vec<_> = report.repos.iter().map(|r| r.repo_id().unwrap()).collect();
    assert_eq!(
        ids,
        vec![
            "technology_transformation_services_gsa_code_gov_harvester",
            "office_cio_gsa_internal_tool_year",
        ]
    );
}

#[test]
fn test_v2_key_set_and_agency_passthrough() {
    let doc = fixture(include_str!("fixtures/code_json_v2.json"));
    let report = RepoFormatter::default().format_catalog(&doc).unwrap();
    let first = report.repos[0].to_value().unwrap();

    assert_eq!(keys(&first), SchemaFamily::V2_0_0.canonical_fields());
    assert!(first.get("homepageURL").is_none());
    assert!(first.get("vcs").is_none());

    let agency = &first["agency"];
    assert_eq!(agency["acronym"], "GSA");
    assert_eq!(agency["fallback_file"], "GSA.json");
    assert_eq!(agency["complianceDashboard"], true);
    assert_eq!(agency["requirements"]["openSourceRequirement"], json!(0.5));
    assert_eq!(agency["requirements"]["agencyWidePolicy"], json!(1));

    assert_eq!(first["laborHours"], json!(2080));
    assert_eq!(first["date"]["lastModified"], "2018-02-14T20:30:00.000Z");
}

#[test]
fn test_v2_blank_dates_skipped_and_bad_dates_reported() {
    let doc = fixture(include_str!("fixtures/code_json_v2.json"));
    let report = RepoFormatter::default().format_catalog(&doc).unwrap();

    let second = report.repos[1].to_value().unwrap();
    assert_eq!(second["date"], json!({}));

    let (index, err) = &report.failures[0];
    assert_eq!(*index, 2);
    assert!(matches!(
        err,
        MetadataError::InvalidDateField { field, .. } if field == "date.created"
    ));
}

#[test]
fn test_v2_usage_codes_and_scores() {
    let doc = fixture(include_str!("fixtures/code_json_v2.json"));
    let raw = get_code_json_repos(&doc).unwrap();
    let formatter = RepoFormatter::default();

    assert_eq!(formatter.usage_code(&raw[0]), "1");
    assert_eq!(formatter.usage_code(&raw[1]), "3");

    let weights = FieldWeights::default();
    let released = weights.score_repository(&raw[0]);
    let internal = weights.score_repository(&raw[1]);
    assert!(released.score > internal.score);
    assert!(released.ratio() <= 1.0);
}

#[test]
fn test_v2_repository_url_parsing() {
    let doc = fixture(include_str!("fixtures/code_json_v2.json"));
    let raw = get_code_json_repos(&doc).unwrap();
    let url = raw[0]["repositoryURL"].as_str().unwrap();

    assert!(is_valid_repository_url(url));
    let parsed = parse_github_url(url).unwrap();
    assert_eq!(parsed.owner, "GSA");
    assert_eq!(parsed.repo, "code-gov-harvester");
}

// =============================================================================
// 1.x Catalogs
// =============================================================================

#[test]
fn test_v101_catalog_attaches_agency_acronym() {
    let doc = fixture(include_str!("fixtures/code_json_v101.json"));
    assert_eq!(get_code_json_version(&doc), "1.0.1");

    let report = RepoFormatter::default().format_catalog(&doc).unwrap();
    assert!(report.failures.is_empty());

    let ids: Vec<_> = report.repos.iter().map(|r| r.repo_id().unwrap()).collect();
    assert_eq!(ids, vec!["office_science_doe_grid_simulator", "doe_reactor_controls"]);

    let first = report.repos[0].to_value().unwrap();
    assert_eq!(keys(&first), SchemaFamily::V1_0_1.canonical_fields());
    assert!(first.get("languages").is_none());
    assert_eq!(first["updated"]["lastCommit"], "2016-10-30T18:22:00.000Z");
    assert_eq!(first["agency"], json!({"acronym": "DOE"}));
}

#[test]
fn test_null_record_agency_takes_catalog_agency() {
    let doc = json!({
        "agency": {"acronym": "GSA"},
        "releases": [{"name": "r", "agency": null}]
    });
    let report = RepoFormatter::default().format_catalog(&doc).unwrap();

    assert_eq!(report.repos[0].repo_id(), Some("gsa_r"));
    let first = report.repos[0].to_value().unwrap();
    assert_eq!(first["agency"], json!({"acronym": "GSA"}));
}

#[test]
fn test_v101_usage_codes() {
    let doc = fixture(include_str!("fixtures/code_json_v101.json"));
    let raw = get_code_json_repos(&doc).unwrap();
    let formatter = RepoFormatter::default();

    assert_eq!(formatter.usage_code(&raw[0]), "1");
    assert_eq!(formatter.usage_code(&raw[1]), "3");
}

#[test]
fn test_v100_catalog() {
    let doc = fixture(include_str!("fixtures/code_json_v100.json"));
    assert_eq!(get_code_json_version(&doc), "1.0.0");

    let report = RepoFormatter::default().format_catalog(&doc).unwrap();
    assert_eq!(report.repos.len(), 1);

    match &report.repos[0] {
        CanonicalRepository::V1(repo) => {
            assert_eq!(repo.repo_id.as_deref(), Some("legacy_portal"));
            assert!(repo.agency.is_none());
            assert!(repo.updated.is_null());
            assert_eq!(repo.license, json!("MIT"));
        }
        other => panic!("Expected 1.x record, got {:?}", other),
    }

    let raw = get_code_json_repos(&doc).unwrap();
    assert_eq!(RepoFormatter::default().usage_code(&raw[0]), "1");
}

#[test]
fn test_catalog_without_repo_list() {
    let doc = json!({"version": "2.0.0", "agency": {"acronym": "GSA"}});
    let err = RepoFormatter::default().format_catalog(&doc).unwrap_err();
    assert!(matches!(err, MetadataError::InvalidDocument(_)));
}

#[test]
fn test_new_records_between_harvests() {
    let old = fixture(include_str!("fixtures/code_json_v101.json"));
    let formatter = RepoFormatter::default();
    let previous: Vec<Value> = formatter
        .format_catalog(&old)
        .unwrap()
        .repos
        .iter()
        .map(|r| r.to_value().unwrap())
        .collect();

    let mut current = previous.clone();
    current.push(json!({"name": "Brand New", "repoID": "doe_brand_new"}));

    let added = remove_dupes(&current, &previous);
    assert_eq!(added, vec![json!({"name": "Brand New", "repoID": "doe_brand_new"})]);
}

// =============================================================================
// Mappings and Serializers
// =============================================================================

#[test]
fn test_repo_mapping_flattened_by_path() {
    let mapping: Value = serde_json::from_str(include_str!("fixtures/repo_mapping.json")).unwrap();
    let flat = get_flattened_mapping_properties(&mapping);

    assert_eq!(flat["repos.repoID"], "keyword");
    assert_eq!(flat["repos.name"], "text");
    assert!(!flat.contains_key("repos.name.keyword"));
    assert_eq!(flat["repos.permissions.licenses"], "nested");
    assert_eq!(flat["repos.permissions.licenses.URL"], "keyword");
    assert_eq!(flat["repos.agency.requirements.overallCompliance"], "float");
}

#[test]
fn test_repo_mapping_flattened_by_type() {
    let mapping: Value = serde_json::from_str(include_str!("fixtures/repo_mapping.json")).unwrap();
    let by_type = get_flattened_mapping_properties_by_type(&mapping);

    assert_eq!(by_type["nested"], vec!["repos.permissions.licenses"]);
    assert_eq!(
        by_type["float"],
        vec![
            "repos.agency.requirements.overallCompliance",
            "repos.laborHours",
            "repos.score"
        ]
    );
    assert_eq!(by_type["date"], vec!["repos.date.created", "repos.date.lastModified"]);
    assert!(by_type["keyword"].contains(&"repos.permissions.licenses.name".to_string()));
}

#[test]
fn test_logged_request_never_carries_api_key() {
    let req = json!({
        "method": "POST",
        "url": "/api/repos",
        "headers": {"x-api-key": "s3cret", "content-type": "application/json"},
        "_startTime": 1234
    });
    let logged = LogSerializers::default().request(&req);
    assert!(!logged.to_string().contains("s3cret"));
    assert_eq!(logged["headers"]["content-type"], "application/json");
}
