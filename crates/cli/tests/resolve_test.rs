mod utils;

use starbase_sandbox::predicates::prelude::*;
use utils::*;

mod resolve {
    use super::*;

    #[test]
    fn resolves_pinned_runtime_offline() {
        let sandbox = create_empty_prebun_sandbox();

        let assert = sandbox.run_bin(|cmd| {
            cmd.args(["resolve", "bun0"]);
        });

        assert
            .success()
            .stdout(predicate::str::contains("0.8.1 bun-v0.8.1"));
    }

    #[test]
    fn warns_that_pinned_runtime_is_deprecated() {
        let sandbox = create_empty_prebun_sandbox();

        let assert = sandbox.run_bin(|cmd| {
            cmd.args(["resolve", "bun0"]);
        });

        assert
            .success()
            .stderr(predicate::str::contains("deprecated"));
    }

    #[test]
    fn errors_for_unknown_runtime() {
        let sandbox = create_empty_prebun_sandbox();

        let assert = sandbox.run_bin(|cmd| {
            cmd.args(["resolve", "bun2"]);
        });

        assert.failure().stderr(predicate::str::contains(
            "Unknown runtime bun2, expected one of bun0, bun1.",
        ));
    }

    #[test]
    fn errors_for_unknown_runner() {
        let sandbox = create_empty_prebun_sandbox();

        let assert = sandbox.run_bin(|cmd| {
            cmd.args(["resolve", "bun0"]).env("RUNNER_OS", "Plan9");
        });

        assert.failure().stderr(predicate::str::contains(
            "Failed to detect the runner platform.",
        ));
    }
}
