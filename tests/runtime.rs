// ABOUTME: Integration tests for runtime selection, socket resolution and runtime errors.
// ABOUTME: The Docker round trip needs a real daemon and a running container, so it is ignored by default.

mod support;

use corral::config::Config;
use corral::connection::{OpenedContainer, config_store_for, open_container};
use corral::error::Error;
use corral::executor::CommandExecutor;
use corral::identity::IdentityResolver;
use corral::runtime::*;
use corral::types::ContainerName;
use std::time::Duration;

fn name(value: &str) -> ContainerName {
    ContainerName::new(value).unwrap()
}

mod selection {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn lxc_container_is_looked_up_when_opened() {
        let lxc = support::fake_lxc::FakeLxc::new();
        lxc.set_state("web1", "STOPPED");
        let config = Config {
            lxc_path: lxc.path().to_path_buf(),
            ..Config::default()
        };

        let opened = temp_env::with_var("PATH", Some(lxc.path_env()), || {
            open_container(&config, name("web1"))
        })
        .unwrap();

        assert!(matches!(opened, OpenedContainer::Lxc(_)));
        assert_eq!(opened.runtime_type(), RuntimeType::Lxc);
        assert_eq!(opened.handle().name(), "web1");
    }

    #[cfg(unix)]
    #[test]
    fn unknown_lxc_container_is_a_lookup_error() {
        let lxc = support::fake_lxc::FakeLxc::new();
        let config = Config {
            lxc_path: lxc.path().to_path_buf(),
            ..Config::default()
        };

        let err = temp_env::with_var("PATH", Some(lxc.path_env()), || {
            open_container(&config, name("ghost"))
        })
        .unwrap_err();

        match err {
            Error::Runtime(e) => {
                assert_eq!(e.kind(), RuntimeErrorKind::ContainerNotFound);
                assert!(e.to_string().contains("ghost"), "{e}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_socket_is_a_detection_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            runtime: RuntimeType::Docker,
            socket: Some(dir.path().join("docker.sock").to_string_lossy().into_owned()),
            ..Config::default()
        };

        let err = open_container(&config, name("web1")).unwrap_err();

        match err {
            Error::Runtime(e) => assert_eq!(e.kind(), RuntimeErrorKind::NoRuntimeFound),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn socket_runtime_state_file_is_created_on_demand() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            runtime: RuntimeType::Podman,
            state_dir: dir.path().join("state"),
            ..Config::default()
        };

        let store = config_store_for(&config, &name("web1")).unwrap();

        assert_eq!(store.path(), dir.path().join("state").join("web1.conf"));
        assert!(store.path().exists());
    }

    #[test]
    fn lxc_store_is_a_sidecar_created_on_demand() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            lxc_path: dir.path().to_path_buf(),
            ..Config::default()
        };

        let store = config_store_for(&config, &name("web1")).unwrap();

        assert_eq!(store.path(), dir.path().join("web1").join("corral.conf"));
        assert!(store.path().exists());
        assert!(!dir.path().join("web1").join("config").exists());
    }
}

mod errors {
    use super::*;

    #[test]
    fn kinds() {
        let detection: RuntimeError = DetectionError::NotSocketBased(RuntimeType::Lxc).into();
        assert_eq!(detection.kind(), RuntimeErrorKind::NoRuntimeFound);

        let lookup: RuntimeError = StateError::ContainerNotFound("web1".to_string()).into();
        assert_eq!(lookup.kind(), RuntimeErrorKind::ContainerNotFound);

        let runtime: RuntimeError = StateError::Runtime("boom".to_string()).into();
        assert_eq!(runtime.kind(), RuntimeErrorKind::RuntimeOperation);
        assert_eq!(runtime.connection_details(), None);
    }

    #[test]
    fn connection_details_are_exposed() {
        let err = RuntimeError::Connection {
            message: "/var/run/docker.sock: permission denied".to_string(),
        };
        assert_eq!(err.kind(), RuntimeErrorKind::ConnectionFailed);
        assert_eq!(
            err.connection_details(),
            Some("/var/run/docker.sock: permission denied")
        );
    }
}

/// Resolves a live Docker container named by `CORRAL_TEST_CONTAINER`.
#[test]
#[ignore = "requires a Docker daemon and a running container"]
fn docker_round_trip() {
    support::init_tracing();
    let Ok(container) = std::env::var("CORRAL_TEST_CONTAINER") else {
        return;
    };

    let info = resolve_socket(RuntimeType::Docker, None).unwrap();
    let handle = BollardContainer::connect(&info, name(&container), Duration::from_secs(30))
        .expect("connection should succeed");
    assert!(handle.is_running().unwrap(), "{container} should be running");

    let store = corral::store::MemoryStore::new();
    let mut resolver = IdentityResolver::new(&handle, &store);
    assert!(resolver.resolve_hostname());
    assert!(resolver.resolve_ip_address());
    assert!(resolver.resolve_uuid());

    let executor = CommandExecutor::new(&handle);
    assert_eq!(executor.run_program("echo", &["hello"]).unwrap(), "hello");
    assert_eq!(
        executor
            .run_program("corral-test-no-such-binary", &[""; 0])
            .unwrap_err()
            .kind(),
        corral::executor::RunErrorKind::ProgramNotFound
    );
}
