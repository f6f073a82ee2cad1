// ABOUTME: Test support utilities.
// ABOUTME: Provides a scriptable fake container, deterministic id generation and tracing setup.

// Each test binary only uses some of these helpers, so allow dead_code.
#![allow(dead_code)]

#[cfg(unix)]
pub mod fake_lxc;

use corral::identity::IdGenerator;
use corral::runtime::{
    ContainerState, ExecError, ExecOps, ExecOutput, ExecRequest, HostError, HostOps,
    NetworkError, NetworkInterface, NetworkOps, StateError, StateOps,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Once;
use std::sync::atomic::{AtomicUsize, Ordering};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env().add_directive("corral=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Build an interface with an optional MAC and some addresses.
pub fn iface(name: &str, mac: Option<&str>, addresses: &[&str]) -> NetworkInterface {
    let mut iface = NetworkInterface::new(name);
    iface.mac_address = mac.map(str::to_string);
    iface.addresses = addresses
        .iter()
        .map(|a| a.parse::<IpAddr>().unwrap())
        .collect();
    iface
}

pub fn loopback() -> NetworkInterface {
    iface("lo", None, &["127.0.0.1", "::1"])
}

/// In-memory container whose every capability can be scripted or broken.
///
/// `exec` understands `echo` and `true`; scripted programs return their
/// canned output; anything else exits 127 like a shell would.
pub struct FakeContainer {
    name: String,
    state: Mutex<Result<ContainerState, String>>,
    interfaces: Mutex<Result<Vec<NetworkInterface>, String>>,
    hostname: Mutex<Result<String, String>>,
    parent_hostname: Mutex<Result<String, String>>,
    programs: Mutex<HashMap<String, ExecOutput>>,
    executed: Mutex<Vec<ExecRequest>>,
    interface_calls: AtomicUsize,
}

impl FakeContainer {
    /// A running container with only a loopback interface.
    pub fn running(name: &str) -> Self {
        Self {
            name: name.to_string(),
            state: Mutex::new(Ok(ContainerState::Running)),
            interfaces: Mutex::new(Ok(vec![loopback()])),
            hostname: Mutex::new(Ok(name.to_string())),
            parent_hostname: Mutex::new(Ok("host-a".to_string())),
            programs: Mutex::new(HashMap::new()),
            executed: Mutex::new(Vec::new()),
            interface_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_interface(self, interface: NetworkInterface) -> Self {
        if let Ok(list) = self.interfaces.lock().as_mut() {
            list.push(interface);
        }
        self
    }

    pub fn with_program(self, program: &str, exit_code: i64, stdout: &str, stderr: &str) -> Self {
        self.programs.lock().insert(
            program.to_string(),
            ExecOutput {
                exit_code,
                stdout: stdout.as_bytes().to_vec(),
                stderr: stderr.as_bytes().to_vec(),
            },
        );
        self
    }

    pub fn set_state(&self, state: ContainerState) {
        *self.state.lock() = Ok(state);
    }

    /// Make the container disappear from its runtime.
    pub fn vanish(&self) {
        *self.state.lock() = Err("gone".to_string());
        *self.interfaces.lock() = Err("gone".to_string());
        *self.hostname.lock() = Err("gone".to_string());
    }

    pub fn set_interfaces(&self, interfaces: Vec<NetworkInterface>) {
        *self.interfaces.lock() = Ok(interfaces);
    }

    pub fn break_interfaces(&self, message: &str) {
        *self.interfaces.lock() = Err(message.to_string());
    }

    pub fn set_hostname(&self, hostname: &str) {
        *self.hostname.lock() = Ok(hostname.to_string());
    }

    pub fn break_hostname(&self, message: &str) {
        *self.hostname.lock() = Err(message.to_string());
    }

    pub fn set_parent_hostname(&self, hostname: &str) {
        *self.parent_hostname.lock() = Ok(hostname.to_string());
    }

    pub fn executed(&self) -> Vec<ExecRequest> {
        self.executed.lock().clone()
    }

    pub fn interface_calls(&self) -> usize {
        self.interface_calls.load(Ordering::SeqCst)
    }
}

impl StateOps for FakeContainer {
    fn name(&self) -> &str {
        &self.name
    }

    fn state(&self) -> Result<ContainerState, StateError> {
        self.state
            .lock()
            .clone()
            .map_err(|_| StateError::ContainerNotFound(self.name.clone()))
    }
}

impl NetworkOps for FakeContainer {
    fn interfaces(&self) -> Result<Vec<NetworkInterface>, NetworkError> {
        self.interface_calls.fetch_add(1, Ordering::SeqCst);
        self.interfaces.lock().clone().map_err(NetworkError::Runtime)
    }
}

impl HostOps for FakeContainer {
    fn hostname(&self) -> Result<String, HostError> {
        self.hostname.lock().clone().map_err(HostError::Runtime)
    }

    fn parent_hostname(&self) -> Result<String, HostError> {
        self.parent_hostname
            .lock()
            .clone()
            .map_err(HostError::Runtime)
    }
}

impl ExecOps for FakeContainer {
    fn exec(&self, request: &ExecRequest) -> Result<ExecOutput, ExecError> {
        self.executed.lock().push(request.clone());

        if self.state.lock().is_err() {
            return Err(ExecError::ContainerNotFound(self.name.clone()));
        }
        if let Some(output) = self.programs.lock().get(&request.program) {
            return Ok(output.clone());
        }
        match request.program.as_str() {
            "echo" => Ok(ExecOutput {
                exit_code: 0,
                stdout: format!("{}\n", request.args.join(" ")).into_bytes(),
                stderr: Vec::new(),
            }),
            "true" => Ok(ExecOutput::default()),
            _ => Ok(ExecOutput {
                exit_code: 127,
                stdout: Vec::new(),
                stderr: format!("{}: command not found\n", request.program).into_bytes(),
            }),
        }
    }
}

/// Hands out `uuid-1`, `uuid-2`, ... in order.
#[derive(Default)]
pub struct SequenceIds {
    next: AtomicUsize,
}

impl SequenceIds {
    pub fn issued(&self) -> usize {
        self.next.load(Ordering::SeqCst)
    }
}

impl IdGenerator for SequenceIds {
    fn generate(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        format!("uuid-{n}")
    }
}
