use std::fs;
use std::path::PathBuf;

use pyexpand::Interpreter;
use tempfile::TempDir;

// Helper: one working directory per test so the temp program paths and
// rewritten files never collide across parallel tests.
fn write_input(dir: &TempDir, content: &[u8]) -> PathBuf {
    let path = dir.path().join("input.txt");
    fs::write(&path, content).expect("failed to write test input");
    path
}

fn test_interpreter(dir: &TempDir, command: &[&str]) -> Interpreter {
    Interpreter::from_env()
        .with_command(command.iter().map(|s| s.to_string()).collect())
        .with_temp_path(dir.path().join("prog.py"))
}

mod config_tests {
    use super::*;

    #[test]
    fn test_interpreter_command_from_env() {
        std::env::set_var("PYEXPAND_INTERPRETER", "python3 -u");
        assert_eq!(Interpreter::from_env().command(), ["python3", "-u"]);

        std::env::remove_var("PYEXPAND_INTERPRETER");
        assert_eq!(Interpreter::from_env().command(), ["py"]);
    }

    #[test]
    fn test_builders_override_command_and_temp_path() {
        let interp = Interpreter::from_env()
            .with_command(vec!["cat".into()])
            .with_temp_path("/tmp/somewhere.py");
        assert_eq!(interp.command(), ["cat"]);
        assert_eq!(interp.temp_path(), std::path::Path::new("/tmp/somewhere.py"));
    }
}

#[cfg(unix)]
mod driver_tests {
    use super::*;

    #[test]
    fn test_eval_captures_stdout_then_stderr_and_exit_code() {
        let dir = TempDir::new().unwrap();
        let interp = test_interpreter(&dir, &["sh"]);

        let capture = interp
            .eval(b"echo OUT; echo ERR 1>&2; exit 3")
            .expect("sh should run");

        assert_eq!(capture.output, b"OUT\nERR\n".to_vec());
        assert_eq!(capture.exit_code, 3);
    }

    #[test]
    fn test_eval_drains_both_pipes_past_their_capacity() {
        let dir = TempDir::new().unwrap();
        let interp = test_interpreter(&dir, &["sh"]);

        // 8192 * 17 bytes per stream, well past any pipe buffer. Sequential
        // draining would wedge here once the child blocks on a full stderr.
        let script = b"i=0\n\
            while [ $i -lt 8192 ]; do\n\
            echo aaaaaaaaaaaaaaaa\n\
            echo bbbbbbbbbbbbbbbb 1>&2\n\
            i=$((i+1))\n\
            done\n";
        let capture = interp.eval(script).expect("sh should run");

        let per_stream = 8192 * 17;
        assert_eq!(capture.output.len(), per_stream * 2);
        assert!(!capture.output[..per_stream].contains(&b'b'));
        assert!(!capture.output[per_stream..].contains(&b'a'));
        assert_eq!(capture.exit_code, 0);
    }

    #[test]
    fn test_eval_fails_when_interpreter_is_missing() {
        let dir = TempDir::new().unwrap();
        let interp = test_interpreter(&dir, &["pyexpand-no-such-interpreter"]);

        let err = interp.eval(b"print(1)").unwrap_err();
        assert!(err
            .to_string()
            .contains("Failed to call pyexpand-no-such-interpreter"));
    }
}

#[cfg(unix)]
mod expansion_tests {
    use super::*;
    use pyexpand::expand_file;

    #[test]
    fn test_silent_interpreter_leaves_empty_expansion() {
        let dir = TempDir::new().unwrap();
        let path = write_input(&dir, b"A /*.py 1+2 */ old /* end */");
        let interp = test_interpreter(&dir, &["true"]);

        let summary = expand_file(&path, &interp).unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"A /*.py 1+2 */  /* end */");
        assert_eq!(summary.outcomes.len(), 1);
        assert_eq!(summary.outcomes[0].exit_code, 0);
        assert!(!interp.temp_path().exists());
    }

    #[test]
    fn test_expansion_region_is_replaced_with_interpreter_output() {
        let dir = TempDir::new().unwrap();
        let path = write_input(&dir, b"/*.py 1 + 2 */ old /*");
        // `cat` echoes the temp program back: generated text plus the extra
        // newline the driver writes after it.
        let interp = test_interpreter(&dir, &["cat"]);

        expand_file(&path, &interp).unwrap();

        assert_eq!(
            fs::read(&path).unwrap(),
            b"/*.py 1 + 2 */ print( 1 + 2 )\n\n /*"
        );
    }

    #[test]
    fn test_multiline_expansion_uses_newline_separators() {
        let dir = TempDir::new().unwrap();
        let path = write_input(&dir, b"/*.py return 1 */ old /* t */");
        let interp = test_interpreter(&dir, &["cat"]);

        let summary = expand_file(&path, &interp).unwrap();

        assert!(summary.outcomes[0].is_multiline);
        assert_eq!(
            fs::read(&path).unwrap(),
            b"/*.py return 1 */\ndef user_fn():\n return 1 \nprint(user_fn())\n\n\n/* t */"
        );
    }

    #[test]
    fn test_nonzero_interpreter_exit_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write_input(&dir, b"x /*.py 1 */ y /* z */");
        let interp = test_interpreter(&dir, &["false"]);

        let summary = expand_file(&path, &interp).expect("run should still succeed");

        assert_eq!(summary.outcomes[0].exit_code, 1);
        assert_eq!(fs::read(&path).unwrap(), b"x /*.py 1 */  /* z */");
    }

    #[test]
    fn test_interpreter_stderr_becomes_expansion_text() {
        let dir = TempDir::new().unwrap();
        let path = write_input(&dir, b"x /*.py 1 */ y /* z */");
        // sh cannot parse the generated python; its complaint lands on
        // stderr and is spliced like regular output.
        let interp = test_interpreter(&dir, &["sh"]);

        let summary = expand_file(&path, &interp).unwrap();

        assert_ne!(summary.outcomes[0].exit_code, 0);
        assert!(summary.outcomes[0].output_len > 0);
        let rewritten = fs::read(&path).unwrap();
        assert!(rewritten.starts_with(b"x /*.py 1 */ "));
        assert!(rewritten.ends_with(b" /* z */"));
    }

    #[test]
    fn test_missing_interpreter_leaves_input_untouched() {
        let dir = TempDir::new().unwrap();
        let content = b"x /*.py 1 */ y /* z */";
        let path = write_input(&dir, content);
        let interp = test_interpreter(&dir, &["pyexpand-no-such-interpreter"]);

        expand_file(&path, &interp).unwrap_err();

        assert_eq!(fs::read(&path).unwrap(), content.to_vec());
        assert!(!interp.temp_path().exists());
    }

    #[test]
    fn test_file_without_directives_is_untouched_and_nothing_runs() {
        let dir = TempDir::new().unwrap();
        let content = b"plain bytes \xff\xfe /* ordinary comment */\r\n";
        let path = write_input(&dir, content);
        // Would fail if any directive were found and executed.
        let interp = test_interpreter(&dir, &["pyexpand-no-such-interpreter"]);

        let summary = expand_file(&path, &interp).unwrap();

        assert!(summary.outcomes.is_empty());
        assert_eq!(fs::read(&path).unwrap(), content.to_vec());
    }

    #[test]
    fn test_second_run_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = write_input(
            &dir,
            b"A /*.py 2*2 */ _ /* mid */ B /*.py return 7 */ _ /* end */",
        );
        let interp = test_interpreter(&dir, &["cat"]);

        expand_file(&path, &interp).unwrap();
        let first = fs::read(&path).unwrap();

        expand_file(&path, &interp).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_run_report_written_from_summary() {
        let dir = TempDir::new().unwrap();
        let path = write_input(&dir, b"A /*.py 1+2 */ old /* end */");
        let interp = test_interpreter(&dir, &["true"]);

        let summary = expand_file(&path, &interp).unwrap();
        let report = pyexpand::report::RunReport::from_summary(&summary);

        assert_eq!(report.directives.len(), 1);
        assert_eq!(report.directives[0].offset, 2);
        assert_eq!(report.directives[0].exit_code, 0);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"exit_code\":0"));
    }
}
