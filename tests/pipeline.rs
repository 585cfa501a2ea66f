//! End-to-end behavior of the refresh-then-render pipeline against the
//! in-memory collaborator.

use rate_history::domain::rates::parse_timestamp;
use rate_history::domain::ticks::max_ticks;
use rate_history::prelude::*;
use rate_history::source::SourceCall;

fn entries(rates: &[(&str, f64)]) -> Vec<RateEntry> {
    rates.iter().map(|(d, r)| RateEntry::new(*d, *r)).collect()
}

fn two_days() -> Vec<RateEntry> {
    entries(&[("2024-01-01T00:00:00Z", 1.10), ("2024-01-02T00:00:00Z", 1.12)])
}

#[tokio::test]
async fn one_month_scenario_renders_table_domain_and_ticks() {
    let client =
        RateHistoryClient::with_source(MemorySource::new().with_history(Period::OneMonth, two_days()));

    let view = client.select_period(Period::OneMonth).await;

    let rows = view.table_rows();
    let pairs: Vec<(&str, &str)> = rows.iter().map(TableRow::as_pair).collect();
    assert_eq!(pairs, [("2024-01-01", "1.10"), ("2024-01-02", "1.12")]);

    let snapshot = view.snapshot().expect("view should be ready");
    assert!((snapshot.domain.min - 1.09).abs() < 1e-9);
    assert!((snapshot.domain.max - 1.13).abs() < 1e-9);
    assert_eq!(snapshot.ticks.label(), "every 2 days");

    // Table and chart come from the same snapshot.
    let xs: Vec<String> = snapshot
        .series
        .points
        .iter()
        .map(|p| p.x.format("%Y-%m-%d").to_string())
        .collect();
    let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(xs, dates);
}

#[test]
fn record_round_trips_to_day_precision_point() {
    let record = RateRecord::try_from(RateEntry::new("2024-01-05T00:00:00Z", 1.10)).unwrap();
    let series = SeriesTransformer::default().transform(vec![record]);
    let point = series.points[0];

    assert_eq!(point.x.format("%Y-%m-%d").to_string(), "2024-01-05");
    assert_eq!(point.y, 1.10);
}

#[test]
fn tick_policy_is_total_and_monotone() {
    let mut previous = 0;
    for period in Period::ALL {
        let ticks = interval_for(period);
        assert_eq!(ticks, interval_for(period));
        assert!(ticks.days() >= previous);
        assert!(max_ticks(period) <= 16);
        previous = ticks.days();
    }
}

#[test]
fn domain_of_empty_series_is_an_error() {
    let empty = ChartSeries::new("EUR-USD", Vec::new());
    assert_eq!(domain_of(&empty), Err(SeriesError::Empty));
}

#[test]
fn domain_brackets_every_point() {
    let records: Vec<RateRecord> = [1.0712, 1.0893, 1.0655, 1.0999]
        .iter()
        .enumerate()
        .map(|(i, rate)| RateRecord {
            timestamp: parse_timestamp(&format!("2024-02-{:02}", i + 1)).unwrap(),
            rate: *rate,
        })
        .collect();
    let series = SeriesTransformer::default().transform(records);
    let domain = domain_of(&series).unwrap();

    assert!((domain.min - (1.0655 - 0.01)).abs() < 1e-9);
    assert!((domain.max - (1.0999 + 0.01)).abs() < 1e-9);
    assert!(series.points.iter().all(|p| domain.min < p.y && p.y < domain.max));
}

#[tokio::test]
async fn repeated_refresh_is_idempotent() {
    let orchestrator =
        FetchOrchestrator::new(MemorySource::new().with_history(Period::ThreeMonths, two_days()));

    let first = orchestrator.refresh(Period::ThreeMonths).await.unwrap();
    let second = orchestrator.refresh(Period::ThreeMonths).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn stale_one_month_result_never_replaces_three_months() {
    let three_months = entries(&[
        ("2024-01-01T00:00:00Z", 1.09),
        ("2024-01-08T00:00:00Z", 1.095),
        ("2024-01-15T00:00:00Z", 1.1),
    ]);
    let mut source = MemorySource::new()
        .with_history(Period::OneMonth, two_days())
        .with_history(Period::ThreeMonths, three_months);
    let gate = source.gate(Period::OneMonth);
    let client = RateHistoryClient::with_source(source);

    let stale = client.select_period(Period::OneMonth);
    let fresh = async {
        tokio::task::yield_now().await;
        let view = client.select_period(Period::ThreeMonths).await;
        gate.release().await;
        view
    };
    let _ = tokio::join!(stale, fresh);

    let view = client.view().await;
    assert_eq!(view.period, Period::ThreeMonths);
    let snapshot = view.snapshot().unwrap();
    assert_eq!(snapshot.series.len(), 3);
    assert_eq!(snapshot.ticks.label(), "every 7 days");

    // The 1m refresh did complete at the collaborator; its result was dropped.
    let calls = client.orchestrator().source().calls();
    assert_eq!(
        calls.iter().filter(|c| **c == SourceCall::ListRates).count(),
        2
    );
}

#[tokio::test]
async fn every_error_kind_surfaces_as_failed() {
    let trigger = RateHistoryClient::with_source(MemorySource::new().failing_trigger(500))
        .select_period(Period::OneMonth)
        .await;
    assert!(matches!(trigger.error(), Some(FetchError::Trigger { .. })));

    let retrieval = RateHistoryClient::with_source(MemorySource::new().failing_list(500))
        .select_period(Period::OneMonth)
        .await;
    assert!(matches!(retrieval.error(), Some(FetchError::Retrieval { .. })));

    let empty = RateHistoryClient::with_source(MemorySource::new())
        .select_period(Period::OneMonth)
        .await;
    assert!(matches!(empty.error(), Some(FetchError::EmptySeries)));

    for view in [&trigger, &retrieval, &empty] {
        assert!(!view.is_loading());
        assert!(TableView::new(view).render().starts_with("Failed to load rates:"));
    }
}

#[tokio::test]
async fn invalid_rate_is_a_data_quality_failure() {
    let source = MemorySource::new().with_history(
        Period::OneMonth,
        entries(&[("2024-01-01", 1.1), ("2024-01-02", 0.0)]),
    );
    let view = RateHistoryClient::with_source(source)
        .select_period(Period::OneMonth)
        .await;

    assert!(matches!(
        view.error(),
        Some(FetchError::InvalidRecord {
            index: 1,
            reason: RecordError::InvalidRate(_)
        })
    ));
}
