//! Manifest plugins: external programs attached as a single subcommand.

use std::path::{Path, PathBuf};
use std::process::Command as Process;

use clap::{Arg, ArgMatches, Command};
use devkit_core::{CommandTree, Outcome, PluginContext, PluginError, PluginMeta, ToolkitPlugin};

use super::manifest::PluginManifest;

/// Environment variable carrying the resolved data directory to plugin programs.
pub(crate) const DATA_DIR_ENV: &str = "DEVKIT_DATA_DIR";

const ARGS: &str = "args";

/// A plugin backed by a program declared in `devkit-plugin.toml`.
///
/// Every argument after the subcommand name is forwarded untouched, and the
/// program's exit status becomes the CLI's exit status.
#[derive(Debug)]
pub(crate) struct ExternalPlugin {
    meta: PluginMeta,
    command: String,
    exec: PathBuf,
    dir: PathBuf,
}

impl ExternalPlugin {
    pub(crate) fn from_manifest(manifest: &PluginManifest, dir: &Path) -> Self {
        let m = &manifest.plugin;
        Self {
            meta: PluginMeta::new(&m.name, &m.version, &m.description),
            command: manifest.command_name(),
            exec: manifest.exec_path(dir),
            dir: dir.to_path_buf(),
        }
    }

    pub(crate) fn command_name(&self) -> &str {
        &self.command
    }

    pub(crate) fn exec(&self) -> &Path {
        &self.exec
    }

    fn subtree(&self) -> Command {
        Command::new(self.command.clone())
            .disable_help_flag(true)
            .arg(
                Arg::new(ARGS)
                    .num_args(0..)
                    .trailing_var_arg(true)
                    .allow_hyphen_values(true),
            )
    }
}

impl ToolkitPlugin for ExternalPlugin {
    fn meta(&self) -> &PluginMeta {
        &self.meta
    }

    fn register(&self, tree: &mut CommandTree) -> Result<(), PluginError> {
        tree.attach(&self.command, &self.meta.description, self.subtree())?;
        Ok(())
    }

    fn execute(
        &self,
        ctx: &PluginContext,
        _subtree: &str,
        matches: &ArgMatches,
    ) -> Result<Outcome, PluginError> {
        let args: Vec<&String> = matches
            .get_many::<String>(ARGS)
            .map(Iterator::collect)
            .unwrap_or_default();

        tracing::debug!(plugin = %self.meta.name, exec = ?self.exec, ?args, "Running plugin program");
        let status = Process::new(&self.exec)
            .args(args)
            .env(DATA_DIR_ENV, &ctx.data_dir)
            .env("DEVKIT_PLUGIN_DIR", &self.dir)
            .status()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    PluginError::invalid_input(format!(
                        "Plugin program not found: {}",
                        self.exec.display()
                    ))
                } else {
                    PluginError::Io(e)
                }
            })?;

        match status.code() {
            Some(code) => Ok(Outcome::Exited(code)),
            None => {
                tracing::warn!(plugin = %self.meta.name, "Plugin program terminated by signal");
                Ok(Outcome::Exited(1))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(command: Option<&str>, exec: &str) -> PluginManifest {
        let command = command
            .map(|c| format!("command = \"{c}\"\n"))
            .unwrap_or_default();
        toml::from_str(&format!(
            "[plugin]\nname = \"Hello World\"\nversion = \"0.2.0\"\ndescription = \"Says hello\"\n{command}exec = \"{exec}\"\n"
        ))
        .unwrap()
    }

    #[test]
    fn test_from_manifest() {
        let plugin = ExternalPlugin::from_manifest(&manifest(None, "bin/hello"), Path::new("/p"));
        assert_eq!(plugin.meta().name, "Hello World");
        assert_eq!(plugin.command_name(), "hello-world");
        assert_eq!(plugin.exec(), Path::new("/p/bin/hello"));
    }

    #[test]
    fn test_register_attaches_forwarding_subtree() {
        let plugin = ExternalPlugin::from_manifest(&manifest(Some("hi"), "run"), Path::new("/p"));
        let mut tree = CommandTree::new(Command::new("devkit"));
        plugin.register(&mut tree).unwrap();
        assert!(tree.is_claimed("hi"));
    }

    #[test]
    fn test_forwarded_args_keep_hyphens() {
        let plugin = ExternalPlugin::from_manifest(&manifest(Some("hi"), "run"), Path::new("/p"));
        let matches = plugin
            .subtree()
            .try_get_matches_from(["hi", "--name", "x", "-v", "--help"])
            .unwrap();
        let args: Vec<&String> = matches.get_many::<String>(ARGS).unwrap().collect();
        assert_eq!(args, ["--name", "x", "-v", "--help"]);
    }

    #[test]
    fn test_missing_program_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let plugin =
            ExternalPlugin::from_manifest(&manifest(Some("hi"), "missing-program"), dir.path());
        let matches = plugin.subtree().try_get_matches_from(["hi"]).unwrap();
        let ctx = PluginContext::new(dir.path());

        let err = plugin.execute(&ctx, "hi", &matches).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("Plugin program not found"));
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_forwards_exit_code_and_env() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("run.sh");
        std::fs::write(
            &script,
            "#!/bin/sh\necho \"$DEVKIT_DATA_DIR $*\" > \"$DEVKIT_DATA_DIR/out.txt\"\nexit 3\n",
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let plugin = ExternalPlugin::from_manifest(&manifest(Some("hi"), "run.sh"), dir.path());
        let matches = plugin.subtree().try_get_matches_from(["hi", "a", "b"]).unwrap();
        let ctx = PluginContext::new(dir.path());

        let outcome = plugin.execute(&ctx, "hi", &matches).unwrap();
        assert_eq!(outcome, Outcome::Exited(3));
        let written = std::fs::read_to_string(dir.path().join("out.txt")).unwrap();
        assert_eq!(written.trim(), format!("{} a b", dir.path().display()));
    }
}
