use std::fs;
use tracing::info;

use conversor::core::rates::MAX_LISTED_RATES;
use conversor::providers::exchangerate_api::ExchangeRateApiProvider;
use conversor::view::ConverterView;

mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const API_KEY: &str = "integration-key";

    pub async fn create_mock_server(base: &str, template: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;
        let url_path = format!("/v6/{API_KEY}/latest/{base}");

        Mock::given(method("GET"))
            .and(path(&url_path))
            .respond_with(template)
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn rates_body(entries: &[(&str, f64)]) -> String {
        let rates = entries
            .iter()
            .map(|(code, rate)| format!("\"{code}\": {rate}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            r#"{{
                "result": "success",
                "base_code": "USD",
                "time_last_update_unix": 1760745601,
                "conversion_rates": {{ {rates} }}
            }}"#
        )
    }

    pub fn write_config(dir: &std::path::Path, base_url: &str) -> std::path::PathBuf {
        let config_path = dir.join("config.yaml");
        let config_content = format!(
            r#"
            provider:
              base_url: {base_url}
              api_key: "{API_KEY}"
            base_currency: "USD"
            defaults:
              from: "USD"
              to: "BRL"
              amount: 10
        "#
        );
        std::fs::write(&config_path, config_content).expect("Failed to write config file");
        config_path
    }
}

use test_utils::{API_KEY, create_mock_server, rates_body, write_config};
use wiremock::ResponseTemplate;

#[test_log::test(tokio::test)]
async fn test_convert_with_mock_provider() {
    let body = rates_body(&[("USD", 1.0), ("BRL", 5.0), ("EUR", 0.9)]);
    let mock_server =
        create_mock_server("USD", ResponseTemplate::new(200).set_body_string(body)).await;
    let provider = ExchangeRateApiProvider::new(&mock_server.uri(), API_KEY);

    let mut view = ConverterView::default();
    assert!(view.mount(&provider, "USD").await);
    assert_eq!(view.currency_options(), vec!["USD", "BRL", "EUR"]);

    view.set_amount(10.0);
    assert_eq!(view.convert(), Ok(Some(50.0)));
    let line = view.result_line();
    info!(?line, "Converted");
    assert_eq!(line.as_deref(), Some("10 USD = 50.00 BRL"));
}

#[test_log::test(tokio::test)]
async fn test_rate_list_is_capped() {
    let codes: Vec<String> = (0..130).map(|i| format!("X{i:02}")).collect();
    let entries: Vec<(&str, f64)> = codes.iter().map(|c| (c.as_str(), 2.0)).collect();
    let mock_server = create_mock_server(
        "USD",
        ResponseTemplate::new(200).set_body_string(rates_body(&entries)),
    )
    .await;
    let provider = ExchangeRateApiProvider::new(&mock_server.uri(), API_KEY);

    let mut view = ConverterView::default();
    view.mount(&provider, "USD").await;

    let listed = view.rate_list();
    assert_eq!(listed.len(), MAX_LISTED_RATES);
    assert_eq!(listed[0].code, "X00");
    assert_eq!(listed[99].code, "X99");
    assert_eq!(view.currency_options().len(), 130);
}

#[test_log::test(tokio::test)]
async fn test_fetch_failure_yields_empty_view() {
    let mock_server = create_mock_server("USD", ResponseTemplate::new(503)).await;
    let provider = ExchangeRateApiProvider::new(&mock_server.uri(), API_KEY);

    let mut view = ConverterView::default();
    assert!(!view.mount(&provider, "USD").await);
    assert!(view.rate_list().is_empty());
    assert!(view.currency_options().is_empty());
    assert_eq!(view.convert(), Ok(None));
    assert_eq!(view.convert(), Ok(None));
    assert!(view.result_line().is_none());
}

#[test_log::test(tokio::test)]
async fn test_unreachable_provider_yields_empty_view() {
    // Nothing listens on the discard port
    let provider = ExchangeRateApiProvider::new("http://127.0.0.1:9", API_KEY);

    let mut view = ConverterView::default();
    assert!(!view.mount(&provider, "USD").await);
    assert!(view.rate_list().is_empty());
    assert_eq!(view.convert(), Ok(None));
}

#[test_log::test(tokio::test)]
async fn test_interactive_session_with_mock_provider() {
    let body = rates_body(&[("USD", 1.0), ("BRL", 5.0), ("EUR", 0.9)]);
    let mock_server =
        create_mock_server("USD", ResponseTemplate::new(200).set_body_string(body)).await;
    let provider = ExchangeRateApiProvider::new(&mock_server.uri(), API_KEY);

    let mut view = ConverterView::default();
    view.mount(&provider, "USD").await;

    let input = "amount 10\nconvert\nfrom eur\nto usd\namount 9\nconvert\nto gbp\nconvert\nquit\n";
    let mut output = Vec::new();
    conversor::cli::interactive::run(&mut view, input.as_bytes(), &mut output).unwrap();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("10 USD = 50.00 BRL"));
    assert!(text.contains("9 EUR = 10.00 USD"));
    assert!(text.contains("GBP is not in the rate table"));
    assert!(text.contains("Unknown currency: GBP"));
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_mock() {
    let body = rates_body(&[("USD", 1.0), ("BRL", 5.0), ("EUR", 0.9)]);
    let mock_server =
        create_mock_server("USD", ResponseTemplate::new(200).set_body_string(body)).await;

    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(temp_dir.path(), &mock_server.uri());

    let result = conversor::run_command(
        conversor::AppCommand::Rates,
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Rates failed with: {:?}", result.err());

    let result = conversor::run_command(
        conversor::AppCommand::Convert(conversor::cli::convert::ConvertArgs {
            from: Some("eur".to_string()),
            to: None,
            amount: Some(9.0),
        }),
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Convert failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_convert_unknown_currency_fails() {
    let body = rates_body(&[("USD", 1.0), ("BRL", 5.0)]);
    let mock_server =
        create_mock_server("USD", ResponseTemplate::new(200).set_body_string(body)).await;

    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(temp_dir.path(), &mock_server.uri());

    let result = conversor::run_command(
        conversor::AppCommand::Convert(conversor::cli::convert::ConvertArgs {
            from: Some("XYZ".to_string()),
            ..Default::default()
        }),
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert_eq!(
        result.unwrap_err().to_string(),
        "Unknown currency: XYZ"
    );
}

#[test_log::test(tokio::test)]
async fn test_convert_succeeds_when_fetch_fails() {
    let mock_server = create_mock_server("USD", ResponseTemplate::new(500)).await;

    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(temp_dir.path(), &mock_server.uri());

    let result = conversor::run_command(
        conversor::AppCommand::Convert(Default::default()),
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok());
}

#[test_log::test(tokio::test)]
async fn test_missing_config_fails() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("missing.yaml");
    assert!(!fs::exists(&config_path).unwrap());

    let result = conversor::run_command(
        conversor::AppCommand::Rates,
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(result.is_err());
}
