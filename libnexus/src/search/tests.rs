use super::*;

const SEARCH_RESPONSE: &str = r#"{
  "items": [
    {
      "id": "ZG9ja2VyLWhvc3RlZDo4ZjZjYzE0",
      "repository": "docker-hosted",
      "format": "docker",
      "group": null,
      "name": "backend",
      "version": "build-12",
      "assets": [
        {
          "downloadUrl": "http://nexus:8081/repository/docker-hosted/v2/backend/manifests/build-12",
          "path": "v2/backend/manifests/build-12",
          "id": "ZG9ja2VyLWhvc3RlZDpkMDY0",
          "repository": "docker-hosted",
          "format": "docker",
          "checksum": {
            "sha1": "4a2f8c0bde5d0d3e9f1b2c6a7e8d9f0a1b2c3d4e",
            "sha256": "0f1e2d3c4b5a69788796a5b4c3d2e1f00f1e2d3c4b5a69788796a5b4c3d2e1f0"
          }
        }
      ]
    }
  ],
  "continuationToken": null
}"#;

fn item(name: &str, version: &str, asset_ids: &[&str]) -> SearchItem {
    SearchItem {
        name: name.to_string(),
        version: version.to_string(),
        assets: asset_ids
            .iter()
            .map(|id| Asset {
                id: id.to_string(),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

#[test]
fn test_search_result_deserialization() {
    let result: SearchResult = serde_json::from_str(SEARCH_RESPONSE).unwrap();

    assert_eq!(result.items.len(), 1);
    let item = &result.items[0];
    assert_eq!(item.name, "backend");
    assert_eq!(item.version, "build-12");
    assert_eq!(item.group, None);
    assert_eq!(item.assets[0].id, "ZG9ja2VyLWhvc3RlZDpkMDY0");
    assert_eq!(item.assets[0].path, "v2/backend/manifests/build-12");
    assert!(item.assets[0].checksum.sha256.starts_with("0f1e"));
    assert!(result.continuation_token.is_none());
}

#[test]
fn test_search_result_empty_items() {
    let result: SearchResult =
        serde_json::from_str(r#"{"items": [], "continuationToken": null}"#).unwrap();

    assert!(result.is_empty());
    assert!(result.find_asset("backend", "1").is_none());
}

#[test]
fn test_search_result_tolerates_missing_fields() {
    let result: SearchResult =
        serde_json::from_str(r#"{"items": [{"name": "app", "assets": [{"id": "a"}]}]}"#).unwrap();

    assert_eq!(result.items[0].version, "");
    assert_eq!(result.items[0].assets[0].checksum, Checksum::default());
}

#[test]
fn test_find_asset_prefers_exact_match() {
    let result = SearchResult {
        items: vec![
            item("backend", "build-1", &["wrong"]),
            item("backend", "build-12", &["right", "second"]),
        ],
        ..Default::default()
    };

    assert_eq!(result.find_asset("backend", "build-12").unwrap().id, "right");
}

#[test]
fn test_find_asset_falls_back_to_first_item() {
    let result = SearchResult {
        items: vec![item("backend", "other", &["first"]), item("x", "y", &["second"])],
        ..Default::default()
    };

    assert_eq!(result.find_asset("backend", "build-12").unwrap().id, "first");
}

#[test]
fn test_find_asset_item_without_assets() {
    let result = SearchResult {
        items: vec![item("backend", "1", &[])],
        ..Default::default()
    };

    assert!(result.find_asset("backend", "1").is_none());
}
