use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CHECKING_CSV: &str = "Date,Description,Amount\n\
    2021-01-05,COFFEE,-10.00\n\
    2021-01-20,BUS,-5.00\n\
    2021-01-25,ONLINE TRANSFER TO SAVINGS,-500.00\n\
    2021-02-01,SNACK,-3.00\n\
    2021-02-03,PAYROLL,2500.00\n";

fn organize() -> Command {
    let mut cmd = Command::cargo_bin("organize").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn run_in_batch_mode_writes_both_streams() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("checking.csv");
    std::fs::write(&input, CHECKING_CSV).unwrap();
    let exceptions = dir.path().join("exceptions.txt");
    std::fs::write(&exceptions, "TRANSFER\n").unwrap();
    let income = dir.path().join("income.csv");
    let expenses = dir.path().join("expenses.csv");

    organize()
        .arg("run")
        .arg(&input)
        .arg("-e")
        .arg(&exceptions)
        .arg("-i")
        .arg(&income)
        .arg("-x")
        .arg(&expenses)
        .arg("--skip-input")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Categorized 1 income and 3 expense transactions.",
        ))
        .stdout(predicate::str::contains("-15.00"));

    let written = std::fs::read_to_string(&expenses).unwrap();
    assert!(written.starts_with("Date,Expense,Description,Category,To,Note\n"));
    assert_eq!(written.lines().count(), 4);
    assert!(!written.contains("TRANSFER"));

    let written = std::fs::read_to_string(&income).unwrap();
    assert!(written.starts_with("Date,Income,Description,Category,From,Note\n"));
    assert!(written.contains("2021-02-03,2500.00,PAYROLL,skipped,skipped,skipped"));
}

#[test]
fn run_with_reverse_sign_flips_streams() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("card.csv");
    std::fs::write(&input, "Posted,Payee,Charge\n2021-03-01,BOOKS,12.00\n").unwrap();
    let expenses = dir.path().join("expenses.csv");

    organize()
        .arg("run")
        .arg(&input)
        .args(["--date-column", "Posted"])
        .args(["--description-column", "Payee"])
        .args(["--amount-column", "Charge"])
        .arg("--reverse-sign")
        .arg("-i")
        .arg(dir.path().join("income.csv"))
        .arg("-x")
        .arg(&expenses)
        .arg("--skip-input")
        .assert()
        .success();

    let written = std::fs::read_to_string(&expenses).unwrap();
    assert!(written.contains("2021-03-01,-12.00,BOOKS"));
    assert!(!dir.path().join("income.csv").exists());
}

#[test]
fn missing_input_file_exits_with_2() {
    let dir = TempDir::new().unwrap();

    organize()
        .current_dir(dir.path())
        .args(["run", "does-not-exist.csv", "--skip-input"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn no_usable_files_exits_with_3() {
    let dir = TempDir::new().unwrap();
    let wrong_columns = dir.path().join("wrong.csv");
    std::fs::write(&wrong_columns, "When,What,HowMuch\n2021-01-01,X,1.00\n").unwrap();
    let empty = dir.path().join("empty.csv");
    std::fs::write(&empty, "Date,Description,Amount\n").unwrap();

    organize()
        .current_dir(dir.path())
        .arg("run")
        .arg(&wrong_columns)
        .arg(&empty)
        .arg("--skip-input")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No usable input files"));
}

#[test]
fn invalid_finance_type_exits_with_4() {
    organize()
        .args(["categories", "--type", "transfers"])
        .assert()
        .code(4);

    organize()
        .args(["report", "--type", "savings"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Invalid finance type"));
}

#[test]
fn header_mismatch_fails_and_leaves_file_alone() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("checking.csv");
    std::fs::write(&input, CHECKING_CSV).unwrap();
    let expenses = dir.path().join("expenses.csv");
    std::fs::write(&expenses, "something,else\n").unwrap();

    organize()
        .arg("run")
        .arg(&input)
        .arg("-i")
        .arg(dir.path().join("income.csv"))
        .arg("-x")
        .arg(&expenses)
        .arg("--skip-input")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Header mismatch"));

    assert_eq!(
        std::fs::read_to_string(&expenses).unwrap(),
        "something,else\n"
    );
    assert!(!dir.path().join("income.csv").exists());
}

#[test]
fn config_accounts_take_command_line_flags() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("checking.csv");
    std::fs::write(&input, CHECKING_CSV).unwrap();
    let exceptions = dir.path().join("exceptions.txt");
    std::fs::write(&exceptions, "TRANSFER\n").unwrap();
    let config = dir.path().join("organize.json");
    let json = serde_json::json!({
        "accounts": [{"name": "checking", "files": [input]}],
        "income_file": dir.path().join("income.csv"),
        "expenses_file": dir.path().join("expenses.csv"),
    });
    std::fs::write(&config, json.to_string()).unwrap();

    organize()
        .arg("run")
        .arg("--config")
        .arg(&config)
        .arg("-e")
        .arg(&exceptions)
        .arg("--skip-input")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Categorized 1 income and 3 expense transactions.",
        ));

    let written = std::fs::read_to_string(dir.path().join("expenses.csv")).unwrap();
    assert!(!written.contains("TRANSFER"));
}

#[test]
fn report_reads_previous_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("checking.csv");
    std::fs::write(&input, CHECKING_CSV).unwrap();
    let income = dir.path().join("income.csv");
    let expenses = dir.path().join("expenses.csv");

    organize()
        .arg("run")
        .arg(&input)
        .arg("-i")
        .arg(&income)
        .arg("-x")
        .arg(&expenses)
        .arg("--skip-input")
        .assert()
        .success();

    let export = dir.path().join("series.csv");
    organize()
        .arg("report")
        .arg("-i")
        .arg(&income)
        .arg("-x")
        .arg(&expenses)
        .args(["--type", "expense", "--all", "--export"])
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 months"));

    assert_eq!(
        std::fs::read_to_string(&export).unwrap(),
        "Month,Sum,MidSum\n2021-01,-515.00,-10.00\n2021-02,-3.00,-508.00\n"
    );
}

#[test]
fn categories_lists_tables() {
    organize()
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Income categories:"))
        .stdout(predicate::str::contains("Expense categories:"));
}
