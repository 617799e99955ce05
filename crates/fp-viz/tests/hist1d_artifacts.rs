use approx::assert_abs_diff_eq;
use fp_core::{BinnedTable, read_binned_table_from, reduce_for_scheme};
use fp_viz::{PlotOptions, PlotProperties, YScale, hist1d_artifacts};

const TABLE: &str = r#"njet,pt,dataset,n,w:sumw,w:sumw2
0,"[0, 10)",data_2018,12,,
0,"[0, 10)",ttbar,8,4.0,2.0
0,"[0, 10)",signal_hh,1,0.5,0.25
1,"[0, 10)",data_2018,6,,
1,"[0, 10)",ttbar,4,2.0,1.0
1,"[10, 20)",ttbar,2,1.0,0.5
1,"[10, 20)",wjets,1,1.0,1.0
1,"[10, 20)",data_2018,3,,
"#;

fn table() -> BinnedTable {
    read_binned_table_from(TABLE.as_bytes(), b',').expect("parse fixture table")
}

#[test]
fn one_artifact_per_dimension() {
    let reduced = reduce_for_scheme(&table(), "n");
    let plots = hist1d_artifacts(&reduced, "counts__n", &PlotOptions::default()).unwrap();

    let keys: Vec<&PlotProperties> = plots.keys().collect();
    assert_eq!(keys.len(), 2);
    let njet = PlotProperties::new().with("project", "njet").with("yscale", "log");
    let pt = PlotProperties::new().with("project", "pt").with("yscale", "log");
    assert!(plots.contains_key(&njet));
    assert!(plots.contains_key(&pt));

    let art = &plots[&pt];
    assert_eq!(art.schema_version, "fast_plotter_hist1d_v0");
    assert_eq!(art.title, "counts__n");
    assert_eq!(art.dimension, "pt");
    assert_eq!(art.bin_edges, vec![0.0, 10.0, 20.0]);
    assert!(art.bin_labels.is_none());
}

#[test]
fn roles_and_stack_order() {
    let reduced = reduce_for_scheme(&table(), "n");
    let plots = hist1d_artifacts(&reduced, "t", &PlotOptions::default()).unwrap();
    let art = plots.values().find(|a| a.dimension == "njet").unwrap();

    let data = art.data.as_ref().expect("data series");
    assert_eq!(data.name, "data_2018");
    assert_eq!(data.y, vec![12.0, 9.0]);

    let sig: Vec<&str> = art.signals.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(sig, vec!["signal_hh"]);

    // Smallest background at the bottom of the stack.
    let bkg: Vec<&str> = art.backgrounds.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(bkg, vec!["wjets", "ttbar"]);
    assert_eq!(art.total_background, vec![8.0, 7.0]);

    // Raw counts: sumw2 == sumw, so errors are sqrt(n).
    assert_abs_diff_eq!(data.yerr[0], 12.0_f64.sqrt(), epsilon = 1e-12);

    let ratio = art.ratio.as_ref().expect("ratio with data and background");
    assert_abs_diff_eq!(ratio.y[0], 1.5, epsilon = 1e-12);
    assert_abs_diff_eq!(ratio.y[1], 9.0 / 7.0, epsilon = 1e-12);
}

#[test]
fn lumi_scales_simulation_only() {
    let reduced = reduce_for_scheme(&table(), "w");
    let options = PlotOptions { lumi: Some(10.0), yscale: YScale::Linear, ..PlotOptions::default() };
    let plots = hist1d_artifacts(&reduced, "t", &options).unwrap();
    let art = plots.values().find(|a| a.dimension == "njet").unwrap();
    assert_eq!(art.yscale, YScale::Linear);

    // Data has no w:* values, so it falls back to raw counts and is not scaled.
    assert_eq!(art.data.as_ref().unwrap().y, vec![12.0, 9.0]);

    let ttbar = art.backgrounds.iter().find(|s| s.name == "ttbar").unwrap();
    assert_abs_diff_eq!(ttbar.y[0], 40.0, epsilon = 1e-12);
    assert_abs_diff_eq!(ttbar.y[1], 30.0, epsilon = 1e-12);
    // sqrt(sumw2) * lumi
    assert_abs_diff_eq!(ttbar.yerr[0], 2.0_f64.sqrt() * 10.0, epsilon = 1e-12);

    let signal = &art.signals[0];
    assert_abs_diff_eq!(signal.y[0], 5.0, epsilon = 1e-12);
}

#[test]
fn unknown_scheme_is_an_error() {
    let reduced = reduce_for_scheme(&table(), "nominal");
    let err = hist1d_artifacts(&reduced, "t", &PlotOptions::default()).unwrap_err();
    assert!(err.to_string().contains("no 'sumw' column"));
}

#[test]
fn custom_dataset_column_and_regexes() {
    let text = "sample,met,n\nobs,1,5\nzh,1,1\nzz,1,3\n";
    let t = read_binned_table_from(text.as_bytes(), b',').unwrap();
    let reduced = reduce_for_scheme(&t, "n");
    let options = PlotOptions {
        dataset_col: "sample".into(),
        data: regex::Regex::new("obs").unwrap(),
        signal: regex::Regex::new("zh").unwrap(),
        ..PlotOptions::default()
    };
    let plots = hist1d_artifacts(&reduced, "t", &options).unwrap();
    assert_eq!(plots.len(), 1);
    let art = plots.values().next().unwrap();
    assert_eq!(art.data.as_ref().unwrap().name, "obs");
    assert_eq!(art.signals[0].name, "zh");
    assert_eq!(art.backgrounds[0].name, "zz");
    assert_eq!(art.bin_labels.as_deref(), Some(&["1".to_string()][..]));
}

#[test]
fn artifact_serializes_to_json() {
    let reduced = reduce_for_scheme(&table(), "n");
    let plots = hist1d_artifacts(&reduced, "t", &PlotOptions::default()).unwrap();
    let art = plots.values().next().unwrap();
    let v: serde_json::Value = serde_json::to_value(art).unwrap();
    assert_eq!(v["schema_version"], "fast_plotter_hist1d_v0");
    assert_eq!(v["yscale"], "log");
    assert!(v.get("lumi").is_none());
    assert!(v["backgrounds"].as_array().is_some());
}
