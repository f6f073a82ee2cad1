// ABOUTME: Stand-in lxc-info and lxc-attach scripts backed by fixture files in a temp directory.
// ABOUTME: lxc-info refuses containers whose LXC config carries keys LXC itself would reject.

use corral::runtime::LxcContainer;
use corral::types::ContainerName;
use std::ffi::OsString;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// Arguments arrive as `-P <lxc_path> -n <name> ...`, so $2 is the path and $4 the name.
const LXC_INFO: &str = r#"#!/bin/sh
dir="$(dirname "$0")"
config="$2/$4/config"
if [ -f "$config" ] && grep -Ev '^[[:space:]]*(#|$|lxc\.)' "$config" >/dev/null; then
  echo "Unknown configuration key in $config" >&2
  exit 1
fi
state_file="$dir/state-$4"
[ -f "$state_file" ] || { echo "$4 doesn't exist" >&2; exit 1; }
cat "$state_file"
"#;

const LXC_ATTACH: &str = r#"#!/bin/sh
dir="$(dirname "$0")"
printf '%s\n' "$@" > "$dir/last-args"
shift 5
case "$1 $2 $3" in
  "ip -o link") cat "$dir/link.txt"; exit 0 ;;
  "ip -o addr") cat "$dir/addr.txt"; exit 0 ;;
esac
[ "$1" = hostname ] && { echo "web1.lxc"; exit 0; }
exec "$@"
"#;

const LINK: &str = "\
1: lo: <LOOPBACK,UP,LOWER_UP> mtu 65536 qdisc noqueue state UNKNOWN mode DEFAULT group default qlen 1000\\    link/loopback 00:00:00:00:00:00 brd 00:00:00:00:00:00
2: eth0@if7: <BROADCAST,MULTICAST,UP,LOWER_UP> mtu 1500 qdisc noqueue state UP mode DEFAULT group default qlen 1000\\    link/ether 00:16:3E:5A:12:34 brd ff:ff:ff:ff:ff:ff link-netnsid 0
";

const ADDR: &str = "\
1: lo    inet 127.0.0.1/8 scope host lo\\       valid_lft forever preferred_lft forever
2: eth0    inet 10.0.3.15/24 brd 10.0.3.255 scope global dynamic eth0\\       valid_lft 3412sec preferred_lft 3412sec
2: eth0    inet6 fe80::216:3eff:fe5a:1234/64 scope link \\       valid_lft forever preferred_lft forever
";

/// A fake LXC installation: tool scripts, command fixtures and container directories.
///
/// The temp directory doubles as the LXC path, so `<dir>/<name>/config` is
/// what the stand-in lxc-info inspects.
pub struct FakeLxc {
    dir: TempDir,
}

impl FakeLxc {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        write_script(&dir.path().join("lxc-info"), LXC_INFO);
        write_script(&dir.path().join("lxc-attach"), LXC_ATTACH);
        fs::write(dir.path().join("link.txt"), LINK).unwrap();
        fs::write(dir.path().join("addr.txt"), ADDR).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// `PATH` with the stand-in tools ahead of the system directories.
    pub fn path_env(&self) -> OsString {
        let mut paths = vec![self.path().to_path_buf()];
        if let Some(existing) = std::env::var_os("PATH") {
            paths.extend(std::env::split_paths(&existing));
        }
        std::env::join_paths(paths).unwrap()
    }

    pub fn set_state(&self, name: &str, state: &str) {
        fs::write(self.path().join(format!("state-{name}")), format!("{state}\n")).unwrap();
    }

    /// Write the container's LXC config and return its path.
    pub fn create_config(&self, name: &str, content: &str) -> PathBuf {
        let container_dir = self.path().join(name);
        fs::create_dir_all(&container_dir).unwrap();
        let path = container_dir.join("config");
        fs::write(&path, content).unwrap();
        path
    }

    /// Write corral's sidecar for the container and return its path.
    pub fn create_store(&self, name: &str, content: &str) -> PathBuf {
        let container_dir = self.path().join(name);
        fs::create_dir_all(&container_dir).unwrap();
        let path = container_dir.join(corral::runtime::LXC_STORE_FILE);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn container(&self, name: &str) -> LxcContainer {
        LxcContainer::with_lxc_path(ContainerName::new(name).unwrap(), self.path())
            .with_tools(self.path().join("lxc-info"), self.path().join("lxc-attach"))
    }

    pub fn last_attach_args(&self) -> Vec<String> {
        fs::read_to_string(self.path().join("last-args"))
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

fn write_script(path: &Path, body: &str) {
    fs::write(path, body).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}
