use starbase_sandbox::create_empty_sandbox;
use system_env::*;

mod runtime_context {
    use super::*;

    #[test]
    fn builds_from_parts() {
        let sandbox = create_empty_sandbox();
        let ctx = RuntimeContext::new(SystemOS::MacOS, SystemArch::Arm64, sandbox.path());

        assert_eq!(ctx.os, SystemOS::MacOS);
        assert_eq!(ctx.arch, SystemArch::Arm64);
        assert_eq!(ctx.temp_dir, sandbox.path());
        assert!(ctx.vars.is_empty());
    }

    #[test]
    fn treats_empty_vars_as_unset() {
        let ctx = RuntimeContext::new(SystemOS::Linux, SystemArch::X64, "/tmp")
            .with_var("GH_TOKEN", "")
            .with_var("GITHUB_TOKEN", "abc");

        assert_eq!(ctx.var("GH_TOKEN"), None);
        assert_eq!(ctx.var("GITHUB_TOKEN"), Some("abc"));
        assert_eq!(ctx.var("MISSING"), None);
    }

    #[test]
    fn detects_github_actions() {
        let ctx = RuntimeContext::new(SystemOS::Linux, SystemArch::X64, "/tmp");

        assert!(!ctx.is_github_actions());
        assert!(ctx.with_var("GITHUB_ACTIONS", "true").is_github_actions());
    }

    #[test]
    fn captures_host_environment() {
        let ctx = RuntimeContext::from_env().unwrap();

        assert!(!ctx.temp_dir.as_os_str().is_empty());
    }
}
