//! Integration tests for [`handler_chain::HandlerChain`].
//!
//! Covers: before/after order, a handler's before stopping the chain, Reply ending the handle phase
//! and reaching after(), and errors from handle() propagating to the caller.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::Utc;
use handler_chain::HandlerChain;
use relay_core::{Chat, Handler, HandlerResponse, Message, RelayBotError, User};

fn create_test_message(content: &str) -> Message {
    Message {
        id: "test_message_id".to_string(),
        content: content.to_string(),
        user: User {
            id: 123,
            username: Some("admin".to_string()),
            first_name: Some("Admin".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 456,
            chat_type: "private".to_string(),
        },
        created_at: Utc::now(),
    }
}

struct CountingHandler {
    before_count: Arc<AtomicUsize>,
    handle_count: Arc<AtomicUsize>,
    after_count: Arc<AtomicUsize>,
}

impl CountingHandler {
    fn new() -> Self {
        Self {
            before_count: Arc::new(AtomicUsize::new(0)),
            handle_count: Arc::new(AtomicUsize::new(0)),
            after_count: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait::async_trait]
impl Handler for CountingHandler {
    async fn before(&self, _message: &Message) -> relay_core::Result<bool> {
        self.before_count.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }

    async fn handle(&self, _message: &Message) -> relay_core::Result<HandlerResponse> {
        self.handle_count.fetch_add(1, Ordering::SeqCst);
        Ok(HandlerResponse::Continue)
    }

    async fn after(&self, _message: &Message, _response: &HandlerResponse) -> relay_core::Result<()> {
        self.after_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// **Test: each phase runs once for a single handler; the chain returns Continue.**
#[tokio::test]
async fn test_handler_chain_runs_every_phase() {
    let handler = Arc::new(CountingHandler::new());
    let chain = HandlerChain::new().add_handler(handler.clone());

    let result = chain.handle(&create_test_message("/status")).await.unwrap();

    assert_eq!(result, HandlerResponse::Continue);
    assert_eq!(handler.before_count.load(Ordering::SeqCst), 1);
    assert_eq!(handler.handle_count.load(Ordering::SeqCst), 1);
    assert_eq!(handler.after_count.load(Ordering::SeqCst), 1);
}

/// **Test: before returning false stops the chain; no handle and no after run.**
#[tokio::test]
async fn test_before_false_stops_chain() {
    struct BlockingHandler;

    #[async_trait::async_trait]
    impl Handler for BlockingHandler {
        async fn before(&self, _message: &Message) -> relay_core::Result<bool> {
            Ok(false)
        }
    }

    let counting = Arc::new(CountingHandler::new());
    let chain = HandlerChain::new()
        .add_handler(Arc::new(BlockingHandler))
        .add_handler(counting.clone());

    let result = chain.handle(&create_test_message("/fetch")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(counting.handle_count.load(Ordering::SeqCst), 0);
    assert_eq!(counting.after_count.load(Ordering::SeqCst), 0);
}

/// **Test: Reply ends the handle phase and is passed to every after().**
#[tokio::test]
async fn test_reply_stops_handle_phase_and_reaches_after() {
    struct ReplyHandler;

    #[async_trait::async_trait]
    impl Handler for ReplyHandler {
        async fn handle(&self, _message: &Message) -> relay_core::Result<HandlerResponse> {
            Ok(HandlerResponse::Reply("✅ Channel set to @news".to_string()))
        }
    }

    struct CaptureHandler {
        seen: Arc<std::sync::Mutex<Option<HandlerResponse>>>,
    }

    #[async_trait::async_trait]
    impl Handler for CaptureHandler {
        async fn after(&self, _message: &Message, response: &HandlerResponse) -> relay_core::Result<()> {
            *self.seen.lock().unwrap() = Some(response.clone());
            Ok(())
        }
    }

    let seen = Arc::new(std::sync::Mutex::new(None));
    let trailing = Arc::new(CountingHandler::new());
    let chain = HandlerChain::new()
        .add_handler(Arc::new(CaptureHandler { seen: seen.clone() }))
        .add_handler(Arc::new(ReplyHandler))
        .add_handler(trailing.clone());

    let result = chain
        .handle(&create_test_message("/setchannel @news"))
        .await
        .unwrap();

    let expected = HandlerResponse::Reply("✅ Channel set to @news".to_string());
    assert_eq!(result, expected);
    assert_eq!(*seen.lock().unwrap(), Some(expected));
    assert_eq!(trailing.handle_count.load(Ordering::SeqCst), 0);
    assert_eq!(trailing.after_count.load(Ordering::SeqCst), 1);
}

/// **Test: before runs first→last and after runs last→first.**
#[tokio::test]
async fn test_multiple_handlers_executed_in_order() {
    let order = Arc::new(std::sync::Mutex::new(Vec::new()));

    struct OrderHandler {
        name: &'static str,
        order: Arc<std::sync::Mutex<Vec<String>>>,
    }

    #[async_trait::async_trait]
    impl Handler for OrderHandler {
        async fn before(&self, _message: &Message) -> relay_core::Result<bool> {
            self.order.lock().unwrap().push(format!("before_{}", self.name));
            Ok(true)
        }

        async fn after(&self, _message: &Message, _response: &HandlerResponse) -> relay_core::Result<()> {
            self.order.lock().unwrap().push(format!("after_{}", self.name));
            Ok(())
        }
    }

    let chain = HandlerChain::new()
        .add_handler(Arc::new(OrderHandler {
            name: "first",
            order: order.clone(),
        }))
        .add_handler(Arc::new(OrderHandler {
            name: "second",
            order: order.clone(),
        }));

    chain.handle(&create_test_message("/help")).await.unwrap();

    let executed = order.lock().unwrap();
    assert_eq!(
        *executed,
        vec!["before_first", "before_second", "after_second", "after_first"]
    );
}

/// **Test: an error from handle() is returned to the caller.**
#[tokio::test]
async fn test_handle_error_propagates() {
    struct FailingHandler;

    #[async_trait::async_trait]
    impl Handler for FailingHandler {
        async fn handle(&self, _message: &Message) -> relay_core::Result<HandlerResponse> {
            Err(RelayBotError::Persistence("disk full".to_string()))
        }
    }

    let chain = HandlerChain::new().add_handler(Arc::new(FailingHandler));
    let err = chain
        .handle(&create_test_message("/addtwitter alice"))
        .await
        .unwrap_err();

    assert!(matches!(err, RelayBotError::Persistence(_)));
}
