//! End-to-end splitting of archive files on disk.

use std::fs;
use std::path::Path;

use mol2split::{Error, Format, SplitConfig, split_file};
use tempfile::TempDir;

const BENZENE: &str = "\
@<TRIPOS>MOLECULE
benzene
 12 12 0 0 0
SMALL
NO_CHARGES

@<TRIPOS>ATOM
      1 C1         1.3915    0.0000    0.0000 C.ar    1 BNZ  0.0000
@<TRIPOS>BOND
     1    1    2 ar
";

const ETHANOL_SDF: &str = "\
ethanol
  RDKit          3D

  3  2  0  0  0  0  0  0  0  0999 V2000
   -1.2700    0.2480    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
  1  2  1  0
M  END
>  <ID>
ETH-1

$$$$
";

fn write_input(dir: &TempDir, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn mol2_record(name: &str) -> String {
    BENZENE.replacen("benzene", name, 1)
}

#[test]
fn mol2_archive_in_pairs_writes_three_partitions() {
    let input_dir = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let names = ["r1", "r2", "r3", "r4", "r5"];
    let text: String = names.iter().map(|n| mol2_record(n)).collect();
    let input = write_input(&input_dir, "library.mol2", &text);

    let config = SplitConfig::new(Format::from_path(&input), 2);
    let report = split_file(&input, out.path(), &config).unwrap();

    assert_eq!(listing(out.path()), ["part1.mol2", "part2.mol2", "part3.mol2"]);
    assert_eq!(
        fs::read_to_string(out.path().join("part2.mol2")).unwrap(),
        mol2_record("r3") + &mol2_record("r4")
    );
    assert_eq!(
        fs::read_to_string(out.path().join("part3.mol2")).unwrap(),
        mol2_record("r5")
    );
    assert_eq!(report.records, 5);
    assert_eq!(report.lines, text.lines().count());
}

#[test]
fn mol2_archive_one_per_file_uses_record_names() {
    let input_dir = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let text: String = ["aspirin", "caffeine", "ibuprofen"]
        .iter()
        .map(|n| mol2_record(n))
        .collect();
    let input = write_input(&input_dir, "drugs.mol2", &text);

    split_file(&input, out.path(), &SplitConfig::new(Format::Mol2, 1)).unwrap();

    assert_eq!(
        listing(out.path()),
        ["aspirin.mol2", "caffeine.mol2", "ibuprofen.mol2"]
    );
    assert_eq!(
        fs::read_to_string(out.path().join("caffeine.mol2")).unwrap(),
        mol2_record("caffeine")
    );
}

#[test]
fn sdf_archive_that_fits_one_partition_is_copied_unchanged() {
    let input_dir = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let text = ETHANOL_SDF.repeat(4);
    let input = write_input(&input_dir, "foo.sdf", &text);

    let config = SplitConfig::new(Format::from_path(&input), 4);
    assert_eq!(config.format(), Format::Sdf);
    let report = split_file(&input, out.path(), &config).unwrap();

    assert_eq!(listing(out.path()), ["part1.sdf"]);
    assert_eq!(fs::read_to_string(out.path().join("part1.sdf")).unwrap(), text);
    assert_eq!(report.records, 4);
}

#[test]
fn crlf_and_missing_final_newline_are_normalized_per_line() {
    let input_dir = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let input = write_input(&input_dir, "dos.sdf", "a\r\n$$$$\r\nb");

    split_file(&input, out.path(), &SplitConfig::new(Format::Sdf, 1)).unwrap();

    assert_eq!(fs::read(out.path().join("part1.sdf")).unwrap(), b"a\r\n$$$$\r\n");
    assert_eq!(fs::read(out.path().join("part2.sdf")).unwrap(), b"b\n");
}

#[test]
fn crlf_record_names_drop_carriage_return() {
    let input_dir = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let input = write_input(&input_dir, "dos.mol2", "@<TRIPOS>MOLECULE\r\nzinc7\r\n");

    split_file(&input, out.path(), &SplitConfig::new(Format::Mol2, 1)).unwrap();

    assert_eq!(listing(out.path()), ["zinc7.mol2"]);
}

#[test]
fn empty_archive_yields_empty_first_partition() {
    let input_dir = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let input = write_input(&input_dir, "empty.mae", "");

    let config = SplitConfig::new(Format::from_path(&input), 10);
    let report = split_file(&input, out.path(), &config).unwrap();

    assert_eq!(listing(out.path()), ["part1.mae"]);
    assert!(fs::read(out.path().join("part1.mae")).unwrap().is_empty());
    assert_eq!(report.records, 0);
}

#[test]
fn failure_midway_keeps_completed_files() {
    let input_dir = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let text = format!("{}@<TRIPOS>MOLECULE\nbad/name\n", mol2_record("good"));
    let input = write_input(&input_dir, "mixed.mol2", &text);

    let err = split_file(&input, out.path(), &SplitConfig::new(Format::Mol2, 1)).unwrap_err();

    assert!(matches!(err, Error::InvalidRecordName { ref name, .. } if name == "bad/name"));
    assert_eq!(listing(out.path()), ["good.mol2"]);
    assert_eq!(
        fs::read_to_string(out.path().join("good.mol2")).unwrap(),
        mol2_record("good")
    );
}
