//! Standby engine against mock JSON-RPC nodes.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use message_relayer::engine::StandbyEngine;
use message_relayer::lifecycle::{startup, Collaborators, ServiceConfig, Shutdown};

mod common;

use common::{FakeCollaborators, FakeSink};

/// Real standby engine, fake reporting sink, externally controlled shutdown.
struct StandbyCollaborators {
    fakes: FakeCollaborators,
    shutdown: Shutdown,
}

impl Collaborators for StandbyCollaborators {
    type Sink = FakeSink;
    type Engine = StandbyEngine;

    fn open_sink(&self, sheet_id: &str) -> FakeSink {
        self.fakes.open_sink(sheet_id)
    }

    fn build_engine(&self, config: ServiceConfig) -> StandbyEngine {
        StandbyEngine::with_shutdown(config, self.shutdown.clone())
            .with_rpc_timeout(Duration::from_secs(5))
    }
}

async fn wait_for_rows(rows: &Arc<Mutex<common::SinkLog>>, count: usize) {
    while rows.lock().unwrap().rows.len() < count {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

#[tokio::test]
async fn test_standby_reports_start_and_stops_on_shutdown() {
    let l1 = common::start_mock_rpc(31337).await;
    let l2 = common::start_mock_rpc(420).await;
    let l1_url = l1.to_string();
    let l2_url = l2.to_string();
    let env = [
        ("L1_NODE_WEB3_URL", l1_url.as_str()),
        ("L2_NODE_WEB3_URL", l2_url.as_str()),
        ("ADDRESS_MANAGER_ADDRESS", common::ADDRESS_MANAGER),
        ("L1_WALLET_KEY", common::DEV_PRIVATE_KEY),
        ("SPREADSHEET_MODE", "true"),
        ("SHEET_ID", "sheet-123"),
        ("CLIENT_EMAIL", "relayer@project.iam.gserviceaccount.com"),
        ("CLIENT_PRIVATE_KEY", "key"),
    ];

    let collaborators = Arc::new(StandbyCollaborators {
        fakes: FakeCollaborators::default(),
        shutdown: Shutdown::new(),
    });
    let sink_log = collaborators.fakes.sink_log.clone();
    let resolver = common::resolver(&[], &env);

    let task = {
        let collaborators = collaborators.clone();
        tokio::spawn(async move { startup::run(&resolver, collaborators.as_ref()).await })
    };

    tokio::time::timeout(Duration::from_secs(10), wait_for_rows(&sink_log, 1))
        .await
        .expect("engine never reported its start");

    {
        let log = sink_log.lock().unwrap();
        assert_eq!(log.rows[0][1], "relayer started");
        assert!(log.rows[0][2].eq_ignore_ascii_case(common::DEV_ADDRESS));
    }

    collaborators.shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("engine did not stop")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_standby_fails_when_l2_unreachable() {
    let l1 = common::start_mock_rpc(31337).await;
    let l1_url = l1.to_string();
    let env = [
        ("L1_NODE_WEB3_URL", l1_url.as_str()),
        ("L2_NODE_WEB3_URL", "http://127.0.0.1:9"),
        ("ADDRESS_MANAGER_ADDRESS", common::ADDRESS_MANAGER),
        ("L1_WALLET_KEY", common::DEV_PRIVATE_KEY),
    ];
    let collaborators = StandbyCollaborators {
        fakes: FakeCollaborators::default(),
        shutdown: Shutdown::new(),
    };

    let err = startup::run(&common::resolver(&[], &env), &collaborators)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("l2 RPC"));
}
