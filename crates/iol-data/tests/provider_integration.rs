//! 모의 HTTP 서버를 사용한 제공자 통합 테스트

use iol_core::{HistoryQuery, HttpConfig, MarketClock, OptionSide, PriceTable};
use iol_data::{DataError, DirectoryOutcome, IolClient};
use mockito::{Matcher, Server, ServerGuard};
use rust_decimal_macros::dec;

const GENERAL_PANEL: &str = r#"<html><body><table><tbody>
<tr><td><a data-symbol="GGAL" href="/titulo/cotizacion/BCBA/GGAL/54321">GGAL</a></td></tr>
<tr><td><a data-symbol="YPFD" href="/titulo/cotizacion/BCBA/YPFD/11111">YPFD</a></td></tr>
</tbody></table></body></html>"#;

const LEADERS_PANEL: &str = r#"<html><body><table><tbody>
<tr><td><a data-symbol="ALUA" href="/titulo/cotizacion/BCBA/ALUA/22222">ALUA</a></td></tr>
<tr><td><a data-symbol="GGAL" href="/otro/GGAL/99999">GGAL</a></td></tr>
</tbody></table></body></html>"#;

const HISTORY_BODY: &str = r#"{"bars":[
    {"time":1672704000,"open":350.0,"high":362.5,"low":348.0,"close":360.0,"volume":1200000},
    {"time":1672790400,"open":360.0,"high":371.0,"low":355.0,"close":369.0,"volume":980000}
]}"#;

const OPTIONS_PAGE: &str = include_str!("fixtures/opciones_ggal.html");

fn client_for(server: &ServerGuard) -> IolClient {
    IolClient::with_http(&HttpConfig::with_base_url(server.url()), MarketClock::utc()).unwrap()
}

async fn mock_argentina_panels(server: &mut ServerGuard) -> (mockito::Mock, mockito::Mock) {
    let general = server
        .mock("GET", "/mercado/cotizaciones/argentina/acciones/panel-general")
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(GENERAL_PANEL)
        .create_async()
        .await;
    let leaders = server
        .mock("GET", "/mercado/cotizaciones/argentina/acciones/panel-lideres")
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(LEADERS_PANEL)
        .create_async()
        .await;
    (general, leaders)
}

// ==================== 가격 이력 ====================

#[tokio::test]
async fn test_price_history_request_and_table() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/cotizaciones/history")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("symbolName".into(), "GGAL".into()),
            Matcher::UrlEncoded("exchange".into(), "BCBA".into()),
            Matcher::UrlEncoded("from".into(), "1672531200".into()),
            Matcher::UrlEncoded("to".into(), "1673308800".into()),
            Matcher::UrlEncoded("resolution".into(), "D".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(HISTORY_BODY)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let query = HistoryQuery::parse("GGAL", "2023-01-01", "2023-01-10").unwrap();
    let table = client.fetch_price_history(&query).await.unwrap();

    mock.assert_async().await;
    assert_eq!(table.columns(), PriceTable::COLUMNS);
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows()[0].fecha, "2023-01-03");
    assert_eq!(table.rows()[0].rendimiento, 0.0);
    assert!((table.rows()[1].rendimiento - 2.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_price_history_invalid_symbol_is_empty() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/cotizaciones/history")
        .match_query(Matcher::UrlEncoded("symbolName".into(), "INVALID".into()))
        .with_status(200)
        .with_body(r#"{"bars":[]}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let query = HistoryQuery::parse("INVALID", "2023-01-01", "2023-06-01").unwrap();
    let table = client.fetch_price_history(&query).await.unwrap();

    assert!(table.is_empty());
    assert_eq!(table.columns(), PriceTable::COLUMNS);
}

#[tokio::test]
async fn test_price_history_upstream_status() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/cotizaciones/history")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("error")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .fetch_price_history(&HistoryQuery::default())
        .await
        .unwrap_err();

    assert!(err.is_upstream());
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_price_history_malformed_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/cotizaciones/history")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>mantenimiento</html>")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .fetch_price_history(&HistoryQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_price_history_timeout_is_upstream() {
    // 연결은 받지만 응답하지 않는 서버
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let holder = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let http = HttpConfig {
        timeout_secs: 1,
        ..HttpConfig::with_base_url(format!("http://{}", addr))
    };
    let client = IolClient::with_http(&http, MarketClock::utc()).unwrap();
    let err = client
        .fetch_price_history(&HistoryQuery::default())
        .await
        .unwrap_err();

    holder.abort();
    assert!(matches!(err, DataError::Timeout(_)), "got {:?}", err);
    assert!(err.is_upstream());
}

// ==================== 심볼 디렉토리 ====================

#[tokio::test]
async fn test_argentina_directory_merges_both_panels() {
    let mut server = Server::new_async().await;
    let (general, leaders) = mock_argentina_panels(&mut server).await;

    let client = client_for(&server);
    let outcome = client
        .fetch_symbol_directory("argentina", "acciones")
        .await
        .unwrap();

    general.assert_async().await;
    leaders.assert_async().await;

    let directory = outcome.directory().unwrap();
    assert_eq!(
        directory.symbols().collect::<Vec<_>>(),
        ["GGAL", "YPFD", "ALUA"]
    );
    assert_eq!(directory.get("GGAL"), Some("/titulo/cotizacion/BCBA/GGAL/54321"));
}

#[tokio::test]
async fn test_directory_is_repeatable() {
    let mut server = Server::new_async().await;
    let _panels = mock_argentina_panels(&mut server).await;

    let client = client_for(&server);
    let first = client.fetch_symbol_directory("argentina", "acciones").await.unwrap();
    let second = client.fetch_symbol_directory("argentina", "acciones").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_directory_unavailable_when_panel_fails() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/mercado/cotizaciones/argentina/acciones/panel-general")
        .with_status(200)
        .with_body(GENERAL_PANEL)
        .create_async()
        .await;
    let _mock = server
        .mock("GET", "/mercado/cotizaciones/argentina/acciones/panel-lideres")
        .with_status(503)
        .create_async()
        .await;

    let client = client_for(&server);
    let outcome = client
        .fetch_symbol_directory("argentina", "acciones")
        .await
        .unwrap();

    assert!(matches!(outcome, DirectoryOutcome::Unavailable { status: 503, .. }));
}

#[tokio::test]
async fn test_directory_single_page_kinds() {
    let mut server = Server::new_async().await;
    let bonds = server
        .mock("GET", "/mercado/cotizaciones/argentina/bonos/todos")
        .with_status(200)
        .with_body(r#"<table><tbody><tr><td><a data-symbol="AL30" href="/t/AL30/777">AL30</a></td></tr></tbody></table>"#)
        .create_async()
        .await;
    let us = server
        .mock("GET", "/mercado/cotizaciones/estados-unidos")
        .with_status(200)
        .with_body(r#"<table><tbody><tr><td><a data-symbol="AAPL" href="/t/AAPL/888">AAPL</a></td></tr></tbody></table>"#)
        .create_async()
        .await;

    let client = client_for(&server);

    let outcome = client.fetch_symbol_directory("argentina", "bonos").await.unwrap();
    assert!(outcome.directory().unwrap().contains("AL30"));

    let outcome = client
        .fetch_symbol_directory("estados-unidos", "acciones")
        .await
        .unwrap();
    assert!(outcome.directory().unwrap().contains("AAPL"));

    bonds.assert_async().await;
    us.assert_async().await;
}

#[tokio::test]
async fn test_options_listing_skips_anchors_without_symbol() {
    let mut server = Server::new_async().await;
    let listing = server
        .mock("GET", "/mercado/cotizaciones/argentina/opciones/todas")
        .with_status(200)
        .with_body(
            r#"<table><tbody>
<tr><td><a data-symbol="GFGC1000OC" href="/t/GFGC1000OC/301">GFGC1000OC</a></td></tr>
<tr><td><a href="/mercado/cotizaciones/argentina/opciones">ver todas</a></td></tr>
<tr><td><a data-symbol="" href="/t/vacio/302">vacío</a></td></tr>
<tr><td><a data-symbol="GFGV1000OC" href="/t/GFGV1000OC/303">GFGV1000OC</a></td></tr>
</tbody></table>"#,
        )
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let outcome = client
        .fetch_symbol_directory("argentina", "opciones")
        .await
        .unwrap();

    listing.assert_async().await;
    let directory = outcome.into_directory().unwrap();
    assert_eq!(directory.len(), 2);
    assert_eq!(directory.get("GFGC1000OC"), Some("/t/GFGC1000OC/301"));
    assert!(directory.contains("GFGV1000OC"));
}

#[tokio::test]
async fn test_unsupported_combination_makes_no_request() {
    let mut server = Server::new_async().await;
    let any = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let outcome = client.fetch_symbol_directory("brasil", "acciones").await.unwrap();

    assert!(matches!(outcome, DirectoryOutcome::Unsupported { .. }));
    any.assert_async().await;
}

// ==================== ID 변환 ====================

#[tokio::test]
async fn test_resolve_internal_id() {
    let mut server = Server::new_async().await;
    let _panels = mock_argentina_panels(&mut server).await;

    let client = client_for(&server);
    let id = client
        .resolve_internal_id("ALUA", "argentina", "acciones")
        .await
        .unwrap();
    assert_eq!(id.as_str(), "22222");

    let err = client
        .resolve_internal_id("NOPE", "argentina", "acciones")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_resolve_with_unavailable_directory_is_not_found() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/mercado/cotizaciones/argentina/acciones/panel-general")
        .with_status(404)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .resolve_internal_id("GGAL", "argentina", "acciones")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

// ==================== 장중 ====================

#[tokio::test]
async fn test_intraday_bcba() {
    let mut server = Server::new_async().await;
    let _panels = mock_argentina_panels(&mut server).await;
    let intraday = server
        .mock("GET", "/Titulo/GraficoIntradiario")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("idTitulo".into(), "54321".into()),
            Matcher::UrlEncoded("idTipo".into(), "4".into()),
            Matcher::UrlEncoded("idMercado".into(), "1".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"FechaHora":"/Date(1672750800000)/","CantidadNominal":300,"Ultima":361.5},
                {"FechaHora":"/Date(1672750860000)/","CantidadNominal":25,"Ultima":362.0}]"#,
        )
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let table = client
        .fetch_intraday("GGAL", "argentina", "acciones", "BCBA")
        .await
        .unwrap();

    intraday.assert_async().await;
    assert_eq!(table.columns(), ["Hora", "Nominales", "Precio"]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows()[0].hora, "13:00:00");
    assert_eq!(table.rows()[1].hora, "13:01:00");
    assert_eq!(table.rows()[1].precio, 362.0);
}

#[tokio::test]
async fn test_intraday_nasdaq_uses_market_three() {
    let mut server = Server::new_async().await;
    let _panels = mock_argentina_panels(&mut server).await;
    let intraday = server
        .mock("GET", "/Titulo/GraficoIntradiario")
        .match_query(Matcher::UrlEncoded("idMercado".into(), "3".into()))
        .with_status(200)
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let table = client
        .fetch_intraday("YPFD", "argentina", "acciones", "NASDAQ")
        .await
        .unwrap();

    intraday.assert_async().await;
    assert!(table.is_empty());
}

#[tokio::test]
async fn test_intraday_soft_failures_are_empty() {
    let mut server = Server::new_async().await;
    let _panels = mock_argentina_panels(&mut server).await;
    let intraday = server
        .mock("GET", "/Titulo/GraficoIntradiario")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);

    // 지원하지 않는 거래소
    let table = client
        .fetch_intraday("GGAL", "argentina", "acciones", "NYSE")
        .await
        .unwrap();
    assert!(table.is_empty());

    // 디렉토리에 없는 심볼
    let table = client
        .fetch_intraday("NOPE", "argentina", "acciones", "BCBA")
        .await
        .unwrap();
    assert!(table.is_empty());

    intraday.assert_async().await;
}

#[tokio::test]
async fn test_intraday_upstream_status() {
    let mut server = Server::new_async().await;
    let _panels = mock_argentina_panels(&mut server).await;
    let _mock = server
        .mock("GET", "/Titulo/GraficoIntradiario")
        .match_query(Matcher::Any)
        .with_status(502)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .fetch_intraday("GGAL", "argentina", "acciones", "BCBA")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(502));
}

// ==================== 옵션 ====================

#[tokio::test]
async fn test_option_chain_golden_page() {
    let mut server = Server::new_async().await;
    let _panels = mock_argentina_panels(&mut server).await;
    let options = server
        .mock("POST", "/Titulo/Opciones")
        .match_body(Matcher::Exact("idTitulo=54321".into()))
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(OPTIONS_PAGE)
        .expect(2)
        .create_async()
        .await;

    let client = client_for(&server);

    let calls = client
        .fetch_option_chain("GGAL", OptionSide::Calls)
        .await
        .unwrap();
    assert_eq!(calls.symbol, "GGAL");
    assert_eq!(calls.side, OptionSide::Calls);
    assert_eq!(calls.len(), 2);
    let first = calls.get("GFGC1000OC").unwrap();
    assert_eq!(first.last, Some(dec!(125.50)));
    assert_eq!(first.variation, Some(dec!(2.45)));
    assert_eq!(first.last_close, Some(dec!(122.50)));
    assert_eq!(first.volume, Some(dec!(1500)));
    assert_eq!(first.date, "16/10/2023");

    let puts = client
        .fetch_option_chain("GGAL", OptionSide::Puts)
        .await
        .unwrap();
    assert_eq!(puts.len(), 3);
    let labels: Vec<&str> = puts.rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, ["GFGV1000OC", "GFGV900OC", "GFGV1200OC"]);

    let idle = puts.get("GFGV900OC").unwrap();
    assert_eq!(idle.last, None);
    assert_eq!(idle.open, None);
    assert_eq!(idle.close, Some(dec!(12.00)));

    let deep = puts.get("GFGV1200OC").unwrap();
    assert_eq!(deep.high, Some(dec!(1215.00)));

    options.assert_async().await;
}

#[tokio::test]
async fn test_option_chain_unknown_symbol() {
    let mut server = Server::new_async().await;
    let _panels = mock_argentina_panels(&mut server).await;

    let client = client_for(&server);
    let err = client
        .fetch_option_chain("NOPE", OptionSide::Calls)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_option_chain_upstream_status() {
    let mut server = Server::new_async().await;
    let _panels = mock_argentina_panels(&mut server).await;
    let _mock = server
        .mock("POST", "/Titulo/Opciones")
        .with_status(403)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .fetch_option_chain("GGAL", OptionSide::Puts)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(403));
}
