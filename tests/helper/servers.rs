//! Mock GitHub and Helm repository servers

use mockito::{Matcher, Mock, ServerGuard};
use serde_json::json;

use nginx_mesh_config::config::{AdapterConfig, ChartConfig, SourceConfig};

/// Registers a contents listing of `stable/` with the given file names
pub async fn mock_listing(server: &mut ServerGuard, files: &[&str]) -> Mock {
    let mut entries: Vec<serde_json::Value> = files
        .iter()
        .map(|name| json!({"name": name, "path": format!("stable/{}", name), "type": "file"}))
        .collect();
    entries.push(json!({"name": "archive", "path": "stable/archive", "type": "dir"}));

    server
        .mock(
            "GET",
            Matcher::Regex(r"^/repos/nginxinc/helm-charts/contents/stable".to_string()),
        )
        .match_query(Matcher::UrlEncoded("ref".into(), "master".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::Value::Array(entries).to_string())
        .create_async()
        .await
}

/// Registers a Helm `index.yaml` mapping chart versions to app versions
pub async fn mock_index(server: &mut ServerGuard, versions: &[(&str, &str)]) -> Mock {
    let mut body = String::from("apiVersion: v1\nentries:\n  nginx-service-mesh:\n");
    for (chart_version, app_version) in versions {
        body.push_str(&format!(
            "  - name: nginx-service-mesh\n    version: {}\n    appVersion: {}\n",
            chart_version, app_version
        ));
    }

    server
        .mock("GET", "/stable/index.yaml")
        .with_status(200)
        .with_header("content-type", "text/yaml")
        .with_body(body)
        .create_async()
        .await
}

/// Configuration pointing both clients at the mock servers
pub fn config_for(github: &ServerGuard, helm: &ServerGuard) -> AdapterConfig {
    AdapterConfig {
        source: SourceConfig {
            api_url: github.url(),
            ..SourceConfig::default()
        },
        chart: ChartConfig {
            repository: format!("{}/stable", helm.url()),
            ..ChartConfig::default()
        },
        ..AdapterConfig::default()
    }
}
