use mediadash::{
    chart_spec, fallback_message, ingest_csv, ChartKind, DashboardSummary, InsightClient,
    InsightConfig, InsightError, PipelineError, SchemaError, ViewEntry, ViewKind,
};

const HEADER: &str = "Date,Platform,Sentiment,Location,Engagements,Media Type\n";

#[test]
fn mixed_rows_clean_and_aggregate() {
    // Rows: one ISO date, one US date, one unparseable date.
    let data = format!(
        "{}\
         2024-01-01,X,Positive,NY,10,Text\n\
         01/02/2024,X,Negative,NY,5,Image\n\
         not-a-date,Y,Positive,LA,3,Text\n",
        HEADER
    );
    let (dataset, report) = ingest_csv(&data).unwrap();

    assert_eq!(report.final_row_count, 2);
    assert_eq!(report.rows_dropped_for_date, 1);
    assert_eq!(
        report.original_row_count,
        report.final_row_count + report.rows_dropped_for_date
    );

    let summary = DashboardSummary::compute(&dataset);
    assert_eq!(
        summary.sentiment.entries,
        vec![ViewEntry::new("Positive", 1), ViewEntry::new("Negative", 1)]
    );
    assert_eq!(
        summary.platform_engagements.entries,
        vec![ViewEntry::new("X", 15)]
    );
}

#[test]
fn schema_error_reports_missing_fields_under_header_variants() {
    // "Media Type" present in odd casing, but sentiment and location absent.
    let data = "DATE,platform,ENGAGEMENTS,Media-Type\n2024-01-01,X,10,Text\n";
    let err = ingest_csv(data).unwrap_err();

    match err {
        PipelineError::Schema(SchemaError::MissingColumns(fields)) => {
            let names: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
            assert_eq!(names, vec!["sentiment", "location"]);
        }
        other => panic!("expected schema error, got {:?}", other),
    }
}

#[test]
fn top_locations_is_bounded_and_sorted() {
    let mut data = HEADER.to_string();
    for i in 0..10 {
        data.push_str(&format!(
            "2024-01-01,X,Positive,City{},{},Text\n",
            i,
            (i + 1) * 10
        ));
    }
    let (dataset, _) = ingest_csv(&data).unwrap();
    let view = DashboardSummary::compute(&dataset).top_locations;

    assert!(view.entries.len() <= 5);
    for pair in view.entries.windows(2) {
        assert!(pair[0].value >= pair[1].value);
    }
    assert_eq!(view.entries[0], ViewEntry::new("City9", 100));
}

#[test]
fn chart_catalog_covers_all_views_with_fixed_kinds() {
    let kinds: Vec<ChartKind> = ViewKind::ALL.iter().map(|v| chart_spec(*v).kind).collect();
    assert_eq!(
        kinds,
        vec![
            ChartKind::Donut,
            ChartKind::Line,
            ChartKind::Bar,
            ChartKind::Donut,
            ChartKind::Bar,
        ]
    );
}

#[tokio::test]
async fn insight_failure_is_scoped_to_each_view() {
    let data = format!(
        "{}\
         2024-01-01,X,Positive,NY,10,Text\n\
         2024-01-02,Y,Negative,LA,5,Image\n",
        HEADER
    );
    let (dataset, _) = ingest_csv(&data).unwrap();
    let summary = DashboardSummary::compute(&dataset);

    // No credential configured: every view should fail independently with
    // the same typed error, and each failure maps to its own fallback text.
    let client = InsightClient::with_config(InsightConfig {
        api_key: None,
        ..InsightConfig::default()
    })
    .unwrap();

    for kind in ViewKind::ALL {
        let err = client
            .generate_insight(summary.view(kind))
            .await
            .unwrap_err();
        assert_eq!(err, InsightError::MissingApiKey);

        let message = fallback_message(kind, &err);
        assert!(message.contains(kind.as_str()));
    }

    // Aggregation itself is unaffected by insight failures.
    assert_eq!(summary.sentiment.entries.len(), 2);
}
