#![allow(dead_code)]

use starbase_sandbox::Sandbox;
use std::collections::HashMap;
use std::fs;
use std::ops::Deref;

pub struct PrebunSandbox {
    pub sandbox: Sandbox,
}

impl PrebunSandbox {
    pub fn new(mut sandbox: Sandbox) -> Self {
        apply_settings(&mut sandbox);

        Self { sandbox }
    }

    pub fn read_action(&self) -> String {
        fs::read_to_string(self.path().join("action.yml")).unwrap()
    }
}

impl Deref for PrebunSandbox {
    type Target = Sandbox;

    fn deref(&self) -> &Self::Target {
        &self.sandbox
    }
}

fn apply_settings(sandbox: &mut Sandbox) {
    let temp_dir = sandbox.path().join(".tmp");

    // Folders must exist or tests fail!
    fs::create_dir_all(&temp_dir).unwrap();

    let mut env = HashMap::new();
    env.insert("RUST_BACKTRACE", "1");
    env.insert("NO_COLOR", "1");
    env.insert("PREBUN_LOG", "trace");
    env.insert("PREBUN_TEST", "true");
    env.insert("RUNNER_OS", "Linux");
    env.insert("RUNNER_ARCH", "X64");
    env.insert("RUNNER_TEMP", temp_dir.to_str().unwrap());
    env.insert("GITHUB_ACTIONS", "");
    env.insert("INPUT_PATH", "");
    env.insert("INPUT_TOKEN", "");

    sandbox.settings.bin = "prebun".into();
    sandbox.settings.timeout = 60;

    sandbox
        .settings
        .env
        .extend(env.into_iter().map(|(k, v)| (k.to_owned(), v.to_owned())));
}

pub fn create_empty_prebun_sandbox() -> PrebunSandbox {
    PrebunSandbox::new(starbase_sandbox::create_empty_sandbox())
}

pub fn create_action_sandbox(content: &str) -> PrebunSandbox {
    let sandbox = create_empty_prebun_sandbox();
    sandbox.create_file("action.yml", content);
    sandbox
}
