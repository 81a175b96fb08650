mod utils;

use starbase_sandbox::predicates::prelude::*;
use utils::*;

mod target {
    use super::*;

    #[test]
    fn prints_target_and_artifact() {
        let sandbox = create_empty_prebun_sandbox();

        let assert = sandbox.run_bin(|cmd| {
            cmd.args(["target", "--os", "Linux", "--arch", "ARM64"]);
        });

        assert
            .success()
            .stdout(predicate::str::contains("linux-aarch64\nbun-linux-aarch64.zip"));
    }

    #[test]
    fn accepts_lowercase_platform_names() {
        let sandbox = create_empty_prebun_sandbox();

        let assert = sandbox.run_bin(|cmd| {
            cmd.args(["target", "--os", "darwin", "--arch", "aarch64"]);
        });

        assert
            .success()
            .stdout(predicate::str::contains("darwin-aarch64"));
    }

    #[test]
    fn selects_baseline_without_avx2() {
        let sandbox = create_empty_prebun_sandbox();

        let assert = sandbox.run_bin(|cmd| {
            cmd.args(["target", "--os", "macOS", "--arch", "X64", "--avx2", "false"]);
        });

        assert
            .success()
            .stdout(predicate::str::contains("bun-darwin-x64-baseline.zip"));
    }

    #[test]
    fn selects_profile_variant() {
        let sandbox = create_empty_prebun_sandbox();

        let assert = sandbox.run_bin(|cmd| {
            cmd.args([
                "target",
                "--os",
                "macOS",
                "--arch",
                "X64",
                "--avx2",
                "true",
                "--variant",
                "debug-info",
            ]);
        });

        assert
            .success()
            .stdout(predicate::str::contains("darwin-x64-profile\nbun-darwin-x64-profile.zip"));
    }

    #[test]
    fn errors_for_windows() {
        let sandbox = create_empty_prebun_sandbox();

        let assert = sandbox.run_bin(|cmd| {
            cmd.args(["target", "--os", "Windows", "--arch", "X64", "--avx2", "true"]);
        });

        assert
            .failure()
            .stderr(predicate::str::contains("Unsupported platform Windows + X64."));
    }

    #[test]
    fn errors_when_avx2_unknown() {
        let sandbox = create_empty_prebun_sandbox();

        let assert = sandbox.run_bin(|cmd| {
            cmd.args(["target", "--os", "Linux", "--arch", "X64"]);
        });

        assert
            .failure()
            .stderr(predicate::str::contains("AVX2 support is unknown"));
    }

    #[test]
    fn errors_for_unknown_os() {
        let sandbox = create_empty_prebun_sandbox();

        let assert = sandbox.run_bin(|cmd| {
            cmd.args(["target", "--os", "Plan9", "--arch", "X64"]);
        });

        assert
            .failure()
            .stderr(predicate::str::contains("Plan9"));
    }
}
