use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

const TABLE: &str = r#"njet,pt,dataset,n,w:sumw,w:sumw2
0,"[0, 10)",data_2018,12,,
0,"[0, 10)",ttbar,8,4.0,2.0
0,"[10, 20)",wjets,3,1.5,0.75
1,"[0, 10)",signal_hh,1,0.5,0.25
1,"[10, 20)",data_2018,5,,
1,"[10, 20)",ttbar,4,2.0,1.0
"#;

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_fast-plotter"))
}

fn tmp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    let mut p = std::env::temp_dir();
    p.push(format!("fp_cli_{}_{}_{}", std::process::id(), nanos, name));
    std::fs::create_dir_all(&p).unwrap();
    p
}

fn write_table(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, TABLE).unwrap();
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(bin_path())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run {:?} {:?}: {}", bin_path(), args, e))
}

fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn svg_plots_for_every_scheme_and_dimension() {
    let dir = tmp_dir("svg");
    let table = write_table(&dir, "counts--njet.pt.csv");
    let out = dir.join("plots");
    std::fs::create_dir(&out).unwrap();

    let output = run(&[
        table.to_str().unwrap(),
        "--outdir",
        out.to_str().unwrap(),
        "-e",
        "svg",
        "--lumi",
        "10",
    ]);
    assert!(output.status.success(), "stderr={}", String::from_utf8_lossy(&output.stderr));

    assert_eq!(
        listing(&out),
        vec![
            "plot_njet.pt--n--project_njet-yscale_log.svg",
            "plot_njet.pt--n--project_pt-yscale_log.svg",
            "plot_njet.pt--w--project_njet-yscale_log.svg",
            "plot_njet.pt--w--project_pt-yscale_log.svg",
        ]
    );
    let svg = std::fs::read_to_string(out.join("plot_njet.pt--w--project_pt-yscale_log.svg")).unwrap();
    assert!(svg.contains(">counts--njet.pt__w<"));
    assert!(svg.contains("10 fb"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Processing:"), "stderr={stderr}");
    assert!(stderr.contains("Saving plot:"), "stderr={stderr}");
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn weights_flag_selects_schemes() {
    let dir = tmp_dir("weights");
    let table = write_table(&dir, "tbl_njet.pt--counts.csv");

    let output = run(&[
        table.to_str().unwrap(),
        "-o",
        dir.to_str().unwrap(),
        "-e",
        ".png",
        "-w",
        "w,absent",
        "-y",
        "linear",
        "--save-artifacts",
    ]);
    assert!(output.status.success(), "stderr={}", String::from_utf8_lossy(&output.stderr));

    let plots: Vec<String> =
        listing(&dir).into_iter().filter(|n| n.starts_with("plot_")).collect();
    assert_eq!(
        plots,
        vec![
            "plot_njet.pt--w--project_njet-yscale_linear.json",
            "plot_njet.pt--w--project_njet-yscale_linear.png",
            "plot_njet.pt--w--project_pt-yscale_linear.json",
            "plot_njet.pt--w--project_pt-yscale_linear.png",
        ]
    );
    let png = std::fs::read(dir.join("plot_njet.pt--w--project_pt-yscale_linear.png")).unwrap();
    assert_eq!(&png[..4], b"\x89PNG");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("'absent' not found"), "stderr={stderr}");
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn config_file_and_theme_apply() {
    let dir = tmp_dir("config");
    let table = write_table(&dir, "counts--njet.csv");
    let config = dir.join("viz.yaml");
    std::fs::write(&config, "experiment:\n  status: Simulation\n").unwrap();

    let output = run(&[
        table.to_str().unwrap(),
        "-o",
        dir.to_str().unwrap(),
        "-e",
        "svg",
        "-w",
        "n",
        "--theme",
        "cms",
        "--config",
        config.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr={}", String::from_utf8_lossy(&output.stderr));
    let svg =
        std::fs::read_to_string(dir.join("plot_njet--n--project_njet-yscale_log.svg")).unwrap();
    assert!(svg.contains(">CMS<"));
    assert!(svg.contains(">Simulation<"));
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn malformed_filename_fails() {
    let dir = tmp_dir("bad_name");
    let table = write_table(&dir, "counts.csv");
    let output = run(&[table.to_str().unwrap(), "-o", dir.to_str().unwrap(), "-e", "svg"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("File name error"), "stderr={stderr}");
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn invalid_regex_is_rejected_up_front() {
    let dir = tmp_dir("regex");
    let table = write_table(&dir, "counts--njet.csv");
    let output = run(&[table.to_str().unwrap(), "-o", dir.to_str().unwrap(), "--data", "(unclosed"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid --data regex"), "stderr={stderr}");
    assert!(!stderr.contains("Processing:"), "stderr={stderr}");
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn missing_input_fails() {
    let dir = tmp_dir("missing");
    let missing = dir.join("nothing--njet.csv");
    let output = run(&[missing.to_str().unwrap(), "-o", dir.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read table"), "stderr={stderr}");
    let _ = std::fs::remove_dir_all(dir);
}

fn plots_with_prefix(dir: &Path, prefix: &str) -> Vec<String> {
    listing(dir).into_iter().filter(|n| n.starts_with(prefix)).collect()
}

#[test]
fn each_table_writes_its_own_plots() {
    let dir = tmp_dir("two_files");
    let first = write_table(&dir, "counts--njet.pt.csv");
    let second = write_table(&dir, "extra--pt.njet.csv");

    let output = run(&[
        first.to_str().unwrap(),
        second.to_str().unwrap(),
        "-o",
        dir.to_str().unwrap(),
        "-e",
        "svg",
    ]);
    assert!(output.status.success(), "stderr={}", String::from_utf8_lossy(&output.stderr));

    let first_plots = plots_with_prefix(&dir, "plot_njet.pt--");
    let second_plots = plots_with_prefix(&dir, "plot_pt.njet--");
    assert_eq!(first_plots.len(), 4, "{first_plots:?}");
    assert_eq!(second_plots.len(), 4, "{second_plots:?}");
    for name in &first_plots {
        let svg = std::fs::read_to_string(dir.join(name)).unwrap();
        assert!(svg.contains(">counts--njet.pt__"), "{name}");
        assert!(!svg.contains(">extra--pt.njet__"), "{name}");
    }
    for name in &second_plots {
        let svg = std::fs::read_to_string(dir.join(name)).unwrap();
        assert!(svg.contains(">extra--pt.njet__"), "{name}");
    }
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn first_failure_stops_the_run() {
    let dir = tmp_dir("abort");
    let first = write_table(&dir, "counts--njet.pt.csv");
    let broken = write_table(&dir, "broken.csv");
    let third = write_table(&dir, "extra--pt.njet.csv");

    let output = run(&[
        first.to_str().unwrap(),
        broken.to_str().unwrap(),
        third.to_str().unwrap(),
        "-o",
        dir.to_str().unwrap(),
        "-e",
        "svg",
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("broken.csv"), "stderr={stderr}");

    assert_eq!(plots_with_prefix(&dir, "plot_njet.pt--").len(), 4);
    assert!(plots_with_prefix(&dir, "plot_pt.njet--").is_empty());
    assert!(!stderr.contains("extra--pt.njet.csv"), "stderr={stderr}");
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn empty_extension_is_rejected() {
    let dir = tmp_dir("no_ext");
    let table = write_table(&dir, "counts--njet.csv");
    for ext in ["", ".", "a.b"] {
        let output = run(&[table.to_str().unwrap(), "-o", dir.to_str().unwrap(), "-e", ext]);
        assert!(!output.status.success(), "extension {ext:?} was accepted");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("not a file extension"), "stderr={stderr}");
    }
    assert!(plots_with_prefix(&dir, "plot_").is_empty());
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn tables_are_required() {
    let output = run(&[]);
    assert!(!output.status.success());
}
