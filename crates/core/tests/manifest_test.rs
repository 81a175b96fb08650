use prebun_core::*;
use starbase_sandbox::create_empty_sandbox;

fn known() -> Vec<String> {
    vec!["bun0".into(), "bun1".into()]
}

fn manifest_from(content: &str) -> ActionManifest {
    let sandbox = create_empty_sandbox();
    sandbox.create_file("action.yml", content);

    ActionManifest::load(&sandbox.path().join("action.yml")).unwrap()
}

mod find_manifest {
    use super::*;

    #[test]
    fn prefers_yml_over_yaml() {
        let sandbox = create_empty_sandbox();
        sandbox.create_file("action.yaml", "name: yaml");
        sandbox.create_file("action.yml", "name: yml");

        assert_eq!(
            find_manifest(sandbox.path()).unwrap(),
            sandbox.path().join("action.yml")
        );
    }

    #[test]
    fn falls_back_to_yaml() {
        let sandbox = create_empty_sandbox();
        sandbox.create_file("action.yaml", "name: yaml");

        assert_eq!(
            find_manifest(sandbox.path()).unwrap(),
            sandbox.path().join("action.yaml")
        );
    }

    #[test]
    fn searches_parent_directories() {
        let sandbox = create_empty_sandbox();
        sandbox.create_file("action.yml", "name: root");
        sandbox.create_file("src/nested/index.js", "");

        assert_eq!(
            find_manifest(&sandbox.path().join("src/nested")).unwrap(),
            sandbox.path().join("action.yml")
        );
    }

    #[test]
    fn errors_when_missing() {
        let sandbox = create_empty_sandbox();
        sandbox.create_file("src/index.js", "");

        // Ancestors of the sandbox may hold a manifest, so only check the error shape
        if let Err(error) = find_manifest(&sandbox.path().join("src")) {
            assert!(matches!(error, PrebunManifestError::NotFound { .. }));
            assert!(!error.is_shape_problem());
        }
    }
}

mod load {
    use super::*;

    #[test]
    fn errors_for_malformed_yaml() {
        let sandbox = create_empty_sandbox();
        sandbox.create_file("action.yml", "runs: [unclosed\n");

        let error = ActionManifest::load(&sandbox.path().join("action.yml")).unwrap_err();

        assert!(matches!(error, PrebunManifestError::Malformed { .. }));
        assert!(error.is_shape_problem());
    }

    #[test]
    fn errors_when_document_not_mapping() {
        let sandbox = create_empty_sandbox();
        sandbox.create_file("action.yml", "- using: bun1\n- main: index.js\n");

        let error = ActionManifest::load(&sandbox.path().join("action.yml")).unwrap_err();

        assert!(matches!(error, PrebunManifestError::Malformed { .. }));
    }

    #[test]
    fn errors_for_missing_file() {
        let sandbox = create_empty_sandbox();

        let error = ActionManifest::load(&sandbox.path().join("action.yml")).unwrap_err();

        assert!(matches!(error, PrebunManifestError::Fs(_)));
        assert!(!error.is_shape_problem());
    }
}

mod validate_runs {
    use super::*;

    #[test]
    fn extracts_stages() {
        let manifest = manifest_from(
            "name: test\nruns:\n  using: bun1\n  pre: setup.js\n  main: index.js\n  post: cleanup.js\n  post-if: always()\n",
        );

        let runs = manifest.validate_runs(&known()).unwrap();

        assert_eq!(runs.using, "bun1");
        assert_eq!(runs.main, "index.js");
        assert_eq!(runs.pre.as_deref(), Some("setup.js"));
        assert_eq!(runs.post.as_deref(), Some("cleanup.js"));
        assert!(runs.rest.contains_key("post-if"));
        assert_eq!(
            runs.stages(),
            vec![
                (Stage::Pre, "setup.js"),
                (Stage::Main, "index.js"),
                (Stage::Post, "cleanup.js")
            ]
        );
    }

    #[test]
    fn only_main_is_required() {
        let manifest = manifest_from("runs:\n  using: bun0\n  main: index.js\n");

        let runs = manifest.validate_runs(&known()).unwrap();

        assert_eq!(runs.stages(), vec![(Stage::Main, "index.js")]);
    }

    #[test]
    fn treats_null_pre_and_post_as_absent() {
        let manifest =
            manifest_from("runs:\n  using: bun0\n  main: index.js\n  pre: null\n  post: ~\n");

        let runs = manifest.validate_runs(&known()).unwrap();

        assert_eq!(runs.pre, None);
        assert_eq!(runs.post, None);
        assert_eq!(runs.stages(), vec![(Stage::Main, "index.js")]);
    }

    #[test]
    fn errors_without_runs() {
        let manifest = manifest_from("name: test\n");
        let error = manifest.validate_runs(&known()).unwrap_err();

        assert!(matches!(error, PrebunManifestError::MissingRuns));
        assert!(error.is_shape_problem());
    }

    #[test]
    fn errors_when_runs_not_mapping() {
        let manifest = manifest_from("runs: bun1\n");

        assert!(matches!(
            manifest.validate_runs(&known()),
            Err(PrebunManifestError::RunsNotMapping)
        ));
    }

    #[test]
    fn errors_for_invalid_using() {
        assert!(matches!(
            manifest_from("runs:\n  main: index.js\n").validate_runs(&known()),
            Err(PrebunManifestError::InvalidUsing)
        ));
        assert!(matches!(
            manifest_from("runs:\n  using: [bun1]\n  main: index.js\n").validate_runs(&known()),
            Err(PrebunManifestError::InvalidUsing)
        ));
    }

    #[test]
    fn errors_for_unknown_runtime() {
        let error = manifest_from("runs:\n  using: node20\n  main: index.js\n")
            .validate_runs(&known())
            .unwrap_err();

        assert!(matches!(
            error,
            PrebunManifestError::UnknownRuntime { using, known } if using == "node20" && known.len() == 2
        ));
    }

    #[test]
    fn errors_for_invalid_stages() {
        assert!(matches!(
            manifest_from("runs:\n  using: bun1\n").validate_runs(&known()),
            Err(PrebunManifestError::InvalidStage { stage }) if stage == "main"
        ));
        assert!(matches!(
            manifest_from("runs:\n  using: bun1\n  main: index.js\n  pre: 123\n").validate_runs(&known()),
            Err(PrebunManifestError::InvalidStage { stage }) if stage == "pre"
        ));
        assert!(matches!(
            manifest_from("runs:\n  using: bun1\n  main: index.js\n  post: [a]\n").validate_runs(&known()),
            Err(PrebunManifestError::InvalidStage { stage }) if stage == "post"
        ));
    }
}

mod rewrite_runs {
    use super::*;

    #[test]
    fn preserves_other_keys_and_order() {
        let sandbox = create_empty_sandbox();
        sandbox.create_file(
            "action.yml",
            "name: test\ndescription: keep me\nruns:\n  using: bun1\n  main: index.js\n  post-if: always()\nbranding:\n  color: blue\n",
        );
        let path = sandbox.path().join("action.yml");

        let mut manifest = ActionManifest::load(&path).unwrap();
        manifest
            .rewrite_runs("node20", &[(Stage::Main, ".bun/main.mjs".into())])
            .unwrap();
        manifest.save(&path).unwrap();

        let reloaded = ActionManifest::load(&path).unwrap();
        let keys = reloaded.fields.keys().cloned().collect::<Vec<_>>();

        assert_eq!(keys, vec!["name", "description", "runs", "branding"]);

        let runs = reloaded
            .validate_runs(&["node20".into()])
            .unwrap();

        assert_eq!(runs.using, "node20");
        assert_eq!(runs.main, ".bun/main.mjs");

        let content = std::fs::read_to_string(&path).unwrap();
        let using_at = content.find("using:").unwrap();
        let main_at = content.find("main:").unwrap();
        let post_if_at = content.find("post-if:").unwrap();

        assert!(using_at < main_at && main_at < post_if_at);
        assert!(content.contains("description: keep me"));
        assert!(content.contains("color: blue"));
    }

    #[test]
    fn errors_without_runs() {
        let mut manifest = manifest_from("name: test\n");

        assert!(manifest.rewrite_runs("node20", &[]).is_err());
    }
}
