//! Property-based tests for the connection registry
//!
//! For any sequence of connects and disconnects, the registry size equals the
//! number of admitted connections that have not been closed.

use proptest::prelude::*;
use relaychat::backend::realtime::{
    ConnectionRegistry, ConnectionState, PresenceBroadcaster, RelayGateway, RelaySession,
};
use relaychat::backend::MemoryDirectory;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
enum Op {
    /// Open a session, with or without a token
    Connect { with_token: bool },
    /// Close the n-th session (modulo the number opened so far)
    Close(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<bool>().prop_map(|with_token| Op::Connect { with_token }),
        2 => any::<usize>().prop_map(Op::Close),
    ]
}

fn run_ops(ops: Vec<Op>) -> Result<(), TestCaseError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("build runtime");

    runtime.block_on(async move {
        let registry = ConnectionRegistry::new();
        let presence = PresenceBroadcaster::new(Arc::new(MemoryDirectory::new()), registry.clone());
        let gateway = RelayGateway::new(registry.clone(), presence, Duration::from_millis(1));
        let mut sessions: Vec<RelaySession> = Vec::new();

        for op in ops {
            match op {
                Op::Connect { with_token } => {
                    let token = with_token.then(|| "user".to_string());
                    let mut session = gateway.open(token);
                    let admitted = gateway.admit(&mut session).await.is_ok();
                    prop_assert_eq!(admitted, with_token);
                    sessions.push(session);
                }
                Op::Close(index) if !sessions.is_empty() => {
                    let index = index % sessions.len();
                    gateway.close(&mut sessions[index]).await;
                }
                Op::Close(_) => {}
            }

            let live = sessions
                .iter()
                .filter(|s| s.state() == ConnectionState::Admitted)
                .count();
            prop_assert_eq!(registry.size().await, live);
        }
        Ok(())
    })
}

proptest! {
    #[test]
    fn test_registry_size_tracks_admitted_sessions(ops in prop::collection::vec(op_strategy(), 0..40)) {
        run_ops(ops)?;
    }
}
