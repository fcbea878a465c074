//! End-to-end tests for the simulated shell.
//!
//! Walks a shell session through the seeded tree the way a terminal page
//! would, tracking the working directory across commands.

use mockdrive::config::SimulationConfig;
use mockdrive::{Config, Simulator};

fn setup() -> Simulator {
    let mut config = Config::default();
    config.simulation = SimulationConfig::instant();
    Simulator::with_demo_data(config).unwrap()
}

/// Run a command, panicking on a shell error, and return (output, new cwd).
async fn run(sim: &Simulator, line: &str, cwd: &str) -> (Option<String>, String) {
    let outcome = sim.shell.execute(line, cwd).await;
    assert!(
        outcome.error.is_none(),
        "unexpected shell error for {line:?}: {:?}",
        outcome.error
    );
    let cwd = outcome.new_path.unwrap_or_else(|| cwd.to_string());
    (outcome.output, cwd)
}

#[tokio::test]
async fn test_session_walks_the_tree() {
    let sim = setup();
    let cwd = "/".to_string();

    let (output, cwd) = run(&sim, "pwd", &cwd).await;
    assert_eq!(output.as_deref(), Some("/"));

    let (output, cwd) = run(&sim, "ls", &cwd).await;
    let listing = output.unwrap();
    assert!(listing.contains("Docs/"));
    assert!(listing.contains("report.txt"));

    let (_, cwd) = run(&sim, "cd Docs", &cwd).await;
    assert_eq!(cwd, "/Docs");

    let (_, cwd) = run(&sim, "cd Test", &cwd).await;
    assert_eq!(cwd, "/Docs/Test");

    let (output, cwd) = run(&sim, "ls", &cwd).await;
    assert_eq!(output.as_deref(), Some("subtest.txt"));

    let (_, cwd) = run(&sim, "cd ../..", &cwd).await;
    assert_eq!(cwd, "/");
}

#[tokio::test]
async fn test_mkdir_is_visible_to_the_file_api() {
    let sim = setup();

    let outcome = sim.shell.execute("mkdir projects", "/").await;
    assert_eq!(
        outcome.output.as_deref(),
        Some("Directory 'projects' created.")
    );

    // The shell and the file API share one store.
    let root = sim.files.list_files("/").await.unwrap();
    assert!(root.iter().any(|n| n.name == "projects" && n.is_directory));
    assert!(sim.files.list_files("/projects").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_file_api_changes_are_visible_to_the_shell() {
    let sim = setup();
    sim.files.rename_node("/Docs", "Papers").await.unwrap();

    let outcome = sim.shell.execute("cd Papers", "/").await;
    assert_eq!(outcome.new_path.as_deref(), Some("/Papers"));

    let outcome = sim.shell.execute("cd Docs", "/").await;
    assert_eq!(
        outcome.error.as_deref(),
        Some("cd: Docs: No such file or directory")
    );
}

#[tokio::test]
async fn test_error_reporting() {
    let sim = setup();

    let outcome = sim.shell.execute("ls /nowhere", "/").await;
    assert_eq!(
        outcome.error.as_deref(),
        Some("ls: cannot access '/nowhere': No such file or directory")
    );

    let outcome = sim.shell.execute("cd report.txt", "/").await;
    assert_eq!(
        outcome.error.as_deref(),
        Some("cd: report.txt: Not a directory")
    );

    let outcome = sim.shell.execute("mkdir Docs", "/").await;
    assert_eq!(
        outcome.error.as_deref(),
        Some("mkdir: cannot create directory 'Docs': File exists")
    );

    let outcome = sim.shell.execute("rm -rf /", "/").await;
    assert_eq!(outcome.error.as_deref(), Some("rm: command not found"));
}

#[tokio::test]
async fn test_help_lists_all_commands() {
    let sim = setup();
    let outcome = sim.shell.execute("help", "/").await;
    let help = outcome.output.unwrap();
    for command in ["ls", "cd", "pwd", "mkdir", "clear", "help"] {
        assert!(help.contains(command), "help is missing {command}");
    }
}
