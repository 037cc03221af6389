//! # Application Controller
//!
//! Owns the application state and the form, routes UI events to them and
//! re-renders the page after every change. Initial loads run on spawned
//! tasks and report back over a channel; everything else is awaited inline,
//! so state is only ever mutated from this controller, one step at a time.

use crate::board::errors::{AppError, GatewayError, Mutation, Resource};
use crate::board::events::{EventSource, UiEvent};
use crate::board::io::{Dialog, PageSink};
use crate::board::models::{AppState, Post, PostKey, User};
use crate::board::services::PostGateway;
use crate::board::view_models::FormController;
use crate::board::views::{render_page, Control, RenderedPage};
use anyhow::Result;
use std::time::Duration;
use tokio::sync::mpsc;

/// Question asked before a post is deleted
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this post?";

/// How long one loop iteration waits for user input
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// One slot per load task started together
const LOAD_CHANNEL_CAPACITY: usize = 2;

/// Result of a load task
#[derive(Debug)]
pub enum LoadMessage {
    Users(Result<Vec<User>, GatewayError>),
    Posts(Result<Vec<Post>, GatewayError>),
}

/// The main application controller
pub struct AppController<G, E, D, S>
where
    G: PostGateway,
    E: EventSource,
    D: Dialog,
    S: PageSink,
{
    state: AppState,
    form: FormController,
    gateway: G,
    events: E,
    dialog: D,
    sink: S,
    /// Page from the last render; its bindings are the live controls
    last_page: RenderedPage,
    /// Dropped while waiting so the channel closes once every task is gone
    load_sender: Option<mpsc::Sender<LoadMessage>>,
    load_receiver: mpsc::Receiver<LoadMessage>,
    pending_loads: usize,
    should_quit: bool,
}

impl<G, E, D, S> AppController<G, E, D, S>
where
    G: PostGateway,
    E: EventSource,
    D: Dialog,
    S: PageSink,
{
    /// Create a controller with empty state and injected I/O
    pub fn new(gateway: G, events: E, dialog: D, sink: S) -> Self {
        let (load_sender, load_receiver) = mpsc::channel(LOAD_CHANNEL_CAPACITY);
        Self {
            state: AppState::new(),
            form: FormController::new(),
            gateway,
            events,
            dialog,
            sink,
            last_page: RenderedPage::default(),
            load_sender: Some(load_sender),
            load_receiver,
            pending_loads: 0,
            should_quit: false,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn dialog(&self) -> &D {
        &self.dialog
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    /// The page currently shown
    pub fn page(&self) -> &RenderedPage {
        &self.last_page
    }

    pub fn pending_loads(&self) -> usize {
        self.pending_loads
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Start fetching users and posts
    ///
    /// The two requests run independently; whichever finishes first is
    /// applied and rendered first. Must be called inside a tokio runtime.
    pub fn start_loading(&mut self) {
        tracing::info!("Loading users and posts");

        let load_sender = self.load_sender();

        let gateway = self.gateway.clone();
        let sender = load_sender.clone();
        tokio::spawn(async move {
            let result = gateway.list_users().await;
            // Ignore send errors (controller might have been dropped)
            let _ = sender.send(LoadMessage::Users(result)).await;
        });

        let gateway = self.gateway.clone();
        let sender = load_sender;
        tokio::spawn(async move {
            let result = gateway.list_posts().await;
            let _ = sender.send(LoadMessage::Posts(result)).await;
        });

        self.pending_loads += 2;
    }

    /// Apply every load result that has already arrived (non-blocking)
    pub fn poll_completions(&mut self) -> Result<usize> {
        let mut applied = 0;
        while let Ok(message) = self.load_receiver.try_recv() {
            self.apply_load(message)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Wait until every started load has been applied
    ///
    /// A load task that dies without reporting closes its end of the
    /// channel, which ends the wait instead of blocking forever.
    pub async fn wait_for_loads(&mut self) -> Result<()> {
        self.load_sender = None;
        while self.pending_loads > 0 {
            match self.load_receiver.recv().await {
                Some(message) => self.apply_load(message)?,
                None => {
                    tracing::error!("{} load(s) ended without a result", self.pending_loads);
                    self.pending_loads = 0;
                }
            }
        }
        Ok(())
    }

    /// Sender for load tasks, reopening the channel after a completed wait
    fn load_sender(&mut self) -> mpsc::Sender<LoadMessage> {
        if let Some(sender) = &self.load_sender {
            return sender.clone();
        }
        let (sender, receiver) = mpsc::channel(LOAD_CHANNEL_CAPACITY);
        self.load_receiver = receiver;
        self.load_sender = Some(sender.clone());
        sender
    }

    /// Mirror one load result in state and re-render
    ///
    /// A failed load leaves its collection as it was and alerts the user.
    pub fn apply_load(&mut self, message: LoadMessage) -> Result<()> {
        self.pending_loads = self.pending_loads.saturating_sub(1);
        match message {
            LoadMessage::Users(Ok(users)) => self.state.set_users(users),
            LoadMessage::Posts(Ok(posts)) => self.state.set_posts(posts),
            LoadMessage::Users(Err(e)) => {
                self.report(AppError::load(Resource::Users, e));
                return Ok(());
            }
            LoadMessage::Posts(Err(e)) => {
                self.report(AppError::load(Resource::Posts, e));
                return Ok(());
            }
        }
        self.render()
    }

    /// Rebuild the page from state and hand it to the sink
    ///
    /// The bindings of the new page replace all previous ones.
    pub fn render(&mut self) -> Result<()> {
        let page = render_page(&self.state, &self.form);
        self.sink.present(&page)?;
        self.last_page = page;
        Ok(())
    }

    /// Handle one UI event
    pub async fn dispatch(&mut self, event: UiEvent) -> Result<()> {
        tracing::debug!("Dispatching UI event: {:?}", event);

        match event {
            UiEvent::CreatePostClicked => {
                self.form.open_for_create();
                self.render()
            }
            UiEvent::CloseClicked => {
                self.form.close();
                self.render()
            }
            UiEvent::EditClicked(key) => {
                if !self.is_bound(Control::Edit, key) {
                    return Ok(());
                }
                // Opening the form only reads the post; nothing is sent
                if self.form.open_for_edit(&self.state, key) {
                    self.render()?;
                }
                Ok(())
            }
            UiEvent::DeleteClicked(key) => {
                if !self.is_bound(Control::Delete, key) {
                    return Ok(());
                }
                self.delete_post(key).await.map(drop)
            }
            UiEvent::FieldChanged { field, value } => {
                if !self.is_form_open("field change") {
                    return Ok(());
                }
                self.form.set_field(field, value);
                self.render()
            }
            UiEvent::FormSubmitted => {
                if !self.is_form_open("submit") {
                    return Ok(());
                }
                self.submit_form().await
            }
            UiEvent::Refresh => self.render(),
            UiEvent::Quit => {
                tracing::info!("Quit requested");
                self.should_quit = true;
                Ok(())
            }
        }
    }

    /// Submit the form, re-rendering on success and alerting on failure
    pub async fn submit_form(&mut self) -> Result<()> {
        match self.form.submit(&self.gateway, &mut self.state).await {
            Ok(post) => {
                tracing::debug!("Form submitted for post {:?}", post.id);
                self.render()
            }
            Err(e) => {
                self.report(e);
                Ok(())
            }
        }
    }

    /// Delete the post at `key` after the user confirmed
    ///
    /// Returns whether the post was removed. A declined prompt or a failed
    /// server call leaves state unchanged; a post without a server id is
    /// only removed locally.
    pub async fn delete_post(&mut self, key: PostKey) -> Result<bool> {
        if !self.dialog.confirm(DELETE_CONFIRMATION) {
            tracing::debug!("Delete of post {key} declined");
            return Ok(false);
        }

        let server_id = self.state.find_post(key).and_then(|post| post.id);
        if let Some(id) = server_id {
            if let Err(e) = self.gateway.delete_post(id).await {
                self.report(AppError::mutation(Mutation::Delete, e));
                return Ok(false);
            }
            tracing::info!("Post {id} deleted");
        }

        let removed = self.state.remove_post(key) > 0;
        self.render()?;
        Ok(removed)
    }

    /// Run the event loop until quit or end of input
    pub async fn run(&mut self) -> Result<()> {
        self.start_loading();
        self.render()?;

        while !self.should_quit {
            self.poll_completions()?;

            if self.events.poll(POLL_INTERVAL)? {
                let event = self.events.read()?;
                self.dispatch(event).await?;
            } else if self.events.is_exhausted() {
                self.wait_for_loads().await?;
                break;
            }

            // Let spawned loads make progress on a single-threaded runtime
            tokio::task::yield_now().await;
        }

        tracing::info!("Event loop finished");
        Ok(())
    }

    /// Whether the last render produced `control` for `key`
    fn is_bound(&self, control: Control, key: PostKey) -> bool {
        let bound = self.last_page.is_bound(control, key);
        if !bound {
            tracing::warn!("Ignoring {control:?} on post {key}: no such control on the page");
        }
        bound
    }

    /// Whether the modal is up to receive form input
    fn is_form_open(&self, action: &str) -> bool {
        let open = self.form.is_visible();
        if !open {
            tracing::warn!("Ignoring {action}: the form is not open");
        }
        open
    }

    /// Log a failure and tell the user
    fn report(&mut self, error: AppError) {
        match &error {
            AppError::Validation(_) => tracing::warn!("{}", error.detailed()),
            _ => tracing::error!("{}", error.detailed()),
        }
        self.dialog.alert(&error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::errors::Operation;
    use crate::board::events::TestEventSource;
    use crate::board::io::{MockDialog, MockPageSink};
    use crate::board::models::{PostFields, UNKNOWN_USER};
    use crate::board::services::{GatewayCall, MockGateway};
    use crate::board::view_models::{FormField, FormMode, ModalState};

    type TestController = AppController<MockGateway, TestEventSource, MockDialog, MockPageSink>;

    fn gateway() -> MockGateway {
        MockGateway::new()
            .with_users(vec![User::new(1, "Alice"), User::new(2, "Bob")])
            .with_posts(vec![
                Post::confirmed(1, PostFields::new("A", "b", 1)),
                Post::confirmed(2, PostFields::new("B", "c", 2)),
            ])
    }

    fn controller(gateway: MockGateway, dialog: MockDialog) -> TestController {
        AppController::new(gateway, TestEventSource::new(), dialog, MockPageSink::new())
    }

    async fn loaded(gateway: MockGateway, dialog: MockDialog) -> TestController {
        let mut app = controller(gateway, dialog);
        app.start_loading();
        app.wait_for_loads().await.unwrap();
        app
    }

    fn set_fields(title: &str, body: &str, user_id: &str) -> Vec<UiEvent> {
        vec![
            UiEvent::FieldChanged {
                field: FormField::Title,
                value: title.to_string(),
            },
            UiEvent::FieldChanged {
                field: FormField::Body,
                value: body.to_string(),
            },
            UiEvent::FieldChanged {
                field: FormField::UserId,
                value: user_id.to_string(),
            },
        ]
    }

    async fn dispatch_all(app: &mut TestController, events: Vec<UiEvent>) {
        for event in events {
            app.dispatch(event).await.unwrap();
        }
    }

    #[tokio::test]
    async fn loading_should_fill_state_and_render_each_completion() {
        let app = loaded(gateway(), MockDialog::new()).await;

        assert_eq!(app.state().users().len(), 2);
        assert_eq!(app.state().posts().len(), 2);
        assert_eq!(app.pending_loads(), 0);
        assert_eq!(app.sink().render_count(), 2);
        assert!(app.sink().last_html().contains("User: Alice"));
        assert!(app.sink().last_html().contains("User: Bob"));
        assert_eq!(app.sink().last_page(), Some(app.page()));
    }

    #[tokio::test]
    async fn posts_before_users_should_render_unknown_then_correct() {
        let mut app = controller(gateway(), MockDialog::new());
        let posts = app.gateway().list_posts().await;
        let users = app.gateway().list_users().await;

        app.apply_load(LoadMessage::Posts(posts)).unwrap();
        assert!(app
            .sink()
            .last_html()
            .contains(&format!("User: {UNKNOWN_USER}")));

        app.apply_load(LoadMessage::Users(users)).unwrap();
        assert!(!app.sink().last_html().contains(UNKNOWN_USER));
    }

    #[tokio::test]
    async fn failed_load_should_alert_and_keep_other_collection() {
        let gateway = gateway();
        gateway.fail(Operation::ListUsers);

        let app = loaded(gateway, MockDialog::new()).await;

        assert!(app.state().users().is_empty());
        assert_eq!(app.state().posts().len(), 2);
        assert_eq!(app.dialog().alerts(), ["Error loading users"]);
        assert!(app.sink().last_html().contains("User: Unknown User"));
    }

    #[tokio::test]
    async fn create_flow_should_append_server_confirmed_post() {
        let mut app = loaded(gateway().with_next_id(101), MockDialog::new()).await;

        app.dispatch(UiEvent::CreatePostClicked).await.unwrap();
        assert_eq!(app.form().modal(), ModalState::Visible);
        dispatch_all(&mut app, set_fields("Hello", "World", "2")).await;
        app.dispatch(UiEvent::FormSubmitted).await.unwrap();

        let created: Vec<&Post> = app
            .state()
            .posts()
            .iter()
            .filter(|p| p.id == Some(101))
            .collect();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].fields(), PostFields::new("Hello", "World", 2));
        assert_eq!(app.form().modal(), ModalState::Hidden);
        assert!(app.page().is_bound(Control::Delete, PostKey::Server(101)));
        assert!(app.sink().last_html().contains("<h2>Hello</h2>"));
    }

    #[tokio::test]
    async fn edit_flow_should_update_post_in_place() {
        let mut app = loaded(gateway(), MockDialog::new()).await;

        app.dispatch(UiEvent::EditClicked(PostKey::Server(1)))
            .await
            .unwrap();
        assert_eq!(app.form().mode(), FormMode::Edit);
        dispatch_all(&mut app, set_fields("A2", "b2", "2")).await;
        app.dispatch(UiEvent::FormSubmitted).await.unwrap();

        let first = &app.state().posts()[0];
        assert_eq!(first.id, Some(1));
        assert_eq!(first.fields(), PostFields::new("A2", "b2", 2));
        assert_eq!(app.state().posts().len(), 2);
        assert!(app.sink().last_html().contains("User: Bob"));
    }

    #[tokio::test]
    async fn opening_edit_should_not_touch_the_server() {
        let mut app = loaded(gateway(), MockDialog::new()).await;

        app.dispatch(UiEvent::EditClicked(PostKey::Server(2)))
            .await
            .unwrap();
        app.dispatch(UiEvent::CloseClicked).await.unwrap();

        assert!(!app.gateway().has_mutations());
        assert_eq!(app.state().posts().len(), 2);
    }

    #[tokio::test]
    async fn invalid_submit_should_alert_without_gateway_call() {
        let mut app = loaded(gateway(), MockDialog::new()).await;
        let before = app.state().clone();

        app.dispatch(UiEvent::CreatePostClicked).await.unwrap();
        dispatch_all(&mut app, set_fields("", "body", "1")).await;
        app.dispatch(UiEvent::FormSubmitted).await.unwrap();

        assert_eq!(app.dialog().last_alert(), Some("Please fill in all fields."));
        assert!(!app.gateway().has_mutations());
        assert_eq!(app.state(), &before);
        assert!(app.form().is_visible());
    }

    #[tokio::test]
    async fn confirmed_delete_should_remove_post() {
        let mut app = loaded(gateway(), MockDialog::accepting()).await;

        app.dispatch(UiEvent::DeleteClicked(PostKey::Server(2)))
            .await
            .unwrap();

        assert!(app.state().find_post(PostKey::Server(2)).is_none());
        assert_eq!(app.dialog().prompts(), [DELETE_CONFIRMATION]);
        assert!(app.gateway().calls().contains(&GatewayCall::DeletePost(2)));
        assert!(!app.page().is_bound(Control::Delete, PostKey::Server(2)));
    }

    #[tokio::test]
    async fn declined_delete_should_change_nothing() {
        let mut app = loaded(gateway(), MockDialog::new()).await;
        let before = app.state().clone();

        app.dispatch(UiEvent::DeleteClicked(PostKey::Server(1)))
            .await
            .unwrap();

        assert_eq!(app.state(), &before);
        assert!(!app.gateway().has_mutations());
    }

    #[tokio::test]
    async fn failed_delete_should_keep_post_listed() {
        let gateway = gateway();
        gateway.fail(Operation::DeletePost);
        let mut app = loaded(gateway, MockDialog::accepting()).await;

        assert!(!app.delete_post(PostKey::Server(1)).await.unwrap());

        assert!(app.state().find_post(PostKey::Server(1)).is_some());
        assert_eq!(app.dialog().last_alert(), Some("Error deleting post"));
        assert!(app.sink().last_html().contains("data-post-id=\"1\""));
    }

    #[tokio::test]
    async fn local_post_should_be_deleted_without_server_call() {
        let gateway = MockGateway::new().with_posts(vec![Post {
            id: None,
            title: "local".to_string(),
            body: "only here".to_string(),
            user_id: 1,
        }]);
        let mut app = loaded(gateway, MockDialog::accepting()).await;

        app.dispatch(UiEvent::DeleteClicked(PostKey::Local(0)))
            .await
            .unwrap();

        assert!(app.state().posts().is_empty());
        assert!(!app.gateway().has_mutations());
    }

    #[tokio::test]
    async fn events_for_unrendered_controls_should_be_ignored() {
        let mut app = loaded(gateway(), MockDialog::accepting()).await;
        let renders = app.sink().render_count();

        app.dispatch(UiEvent::DeleteClicked(PostKey::Server(42)))
            .await
            .unwrap();
        app.dispatch(UiEvent::EditClicked(PostKey::Server(42)))
            .await
            .unwrap();

        assert!(app.dialog().prompts().is_empty());
        assert_eq!(app.sink().render_count(), renders);
        assert!(!app.form().is_visible());
    }

    #[tokio::test]
    async fn submit_on_hidden_form_should_not_post_again() {
        let mut app = loaded(gateway().with_next_id(101), MockDialog::new()).await;
        app.dispatch(UiEvent::CreatePostClicked).await.unwrap();
        dispatch_all(&mut app, set_fields("Hello", "World", "2")).await;
        app.dispatch(UiEvent::FormSubmitted).await.unwrap();
        let after_create = app.state().clone();
        let calls = app.gateway().calls().len();
        let renders = app.sink().render_count();

        app.dispatch(UiEvent::FormSubmitted).await.unwrap();
        dispatch_all(&mut app, set_fields("Other", "text", "1")).await;

        assert_eq!(app.state(), &after_create);
        assert_eq!(app.gateway().calls().len(), calls);
        assert_eq!(app.sink().render_count(), renders);
        assert_eq!(app.form().fields().title, "Hello");
        assert!(!app.form().is_visible());
    }

    #[tokio::test]
    async fn run_should_process_queued_events_until_quit() {
        let mut app = controller(gateway(), MockDialog::new());
        let mut events = set_fields("t", "b", "1");
        events.insert(0, UiEvent::CreatePostClicked);
        events.push(UiEvent::Quit);
        events.push(UiEvent::CreatePostClicked);
        for event in events {
            app.events_mut().push_event(event);
        }

        app.run().await.unwrap();

        assert!(app.should_quit());
        assert_eq!(app.events_mut().remaining(), 1);
        assert_eq!(app.form().fields().title, "t");
    }

    #[tokio::test]
    async fn run_should_finish_loads_when_input_ends() {
        let mut app = controller(gateway(), MockDialog::new());

        app.run().await.unwrap();

        assert_eq!(app.pending_loads(), 0);
        assert_eq!(app.state().posts().len(), 2);
        assert!(!app.should_quit());
    }

    #[tokio::test]
    async fn loading_again_should_reopen_channel() {
        let mut app = loaded(gateway(), MockDialog::new()).await;

        app.start_loading();
        app.wait_for_loads().await.unwrap();

        assert_eq!(app.pending_loads(), 0);
        assert_eq!(app.sink().render_count(), 4);
    }

    /// Gateway whose load tasks die before reporting a result
    #[derive(Clone)]
    struct CrashingGateway;

    impl PostGateway for CrashingGateway {
        async fn list_users(&self) -> Result<Vec<User>, GatewayError> {
            panic!("users load crashed")
        }

        async fn list_posts(&self) -> Result<Vec<Post>, GatewayError> {
            panic!("posts load crashed")
        }

        async fn create_post(&self, _draft: &PostFields) -> Result<Post, GatewayError> {
            unreachable!("no create in this test")
        }

        async fn update_post(&self, _id: u64, _fields: &PostFields) -> Result<Post, GatewayError> {
            unreachable!("no update in this test")
        }

        async fn delete_post(&self, _id: u64) -> Result<(), GatewayError> {
            unreachable!("no delete in this test")
        }
    }

    #[tokio::test]
    async fn run_should_end_when_load_tasks_die() {
        let mut app = AppController::new(
            CrashingGateway,
            TestEventSource::new(),
            MockDialog::new(),
            MockPageSink::new(),
        );

        tokio::time::timeout(Duration::from_secs(5), app.run())
            .await
            .expect("run should not wait on dead load tasks")
            .unwrap();

        assert_eq!(app.pending_loads(), 0);
        assert!(app.state().posts().is_empty());
    }

    #[tokio::test]
    async fn sink_failure_should_propagate() {
        let mut app = controller(gateway(), MockDialog::new());
        let mut sink = MockPageSink::new();
        sink.set_fail_writes(true);
        app.sink = sink;

        assert!(app.render().is_err());
    }
}
