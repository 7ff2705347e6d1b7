//! Transient notifications shown in a corner stack.
//! Any view can push one through the `Toaster` found in context.
use gloo_timers::future::TimeoutFuture;
use leptos::*;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

const TOAST_CLASSES: [(ToastKind, &str); 2] = [
    (ToastKind::Success, "toast toast-success"),
    (ToastKind::Error, "toast toast-error"),
];

impl ToastKind {
    pub fn class(self) -> &'static str {
        TOAST_CLASSES
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, class)| *class)
            .unwrap_or("toast")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: String,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct Toaster {
    toasts: RwSignal<Vec<Toast>>,
    timeout_ms: u32,
}

impl Toaster {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            toasts: create_rw_signal(Vec::new()),
            timeout_ms,
        }
    }

    pub fn toasts(&self) -> Signal<Vec<Toast>> {
        self.toasts.into()
    }

    pub fn push(&self, kind: ToastKind, message: impl Into<String>) {
        let id = Uuid::new_v4().to_string();
        let toast = Toast {
            id: id.clone(),
            kind,
            message: message.into(),
        };
        self.toasts.update(|toasts| toasts.push(toast));

        let toasts = self.toasts;
        let timeout_ms = self.timeout_ms;
        spawn_local(async move {
            TimeoutFuture::new(timeout_ms).await;
            toasts.try_update(|toasts| toasts.retain(|t| t.id != id));
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    pub fn dismiss(&self, id: &str) {
        self.toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }
}

#[component]
pub fn ToastStack() -> impl IntoView {
    let toaster = expect_context::<Toaster>();

    view! {
        <div class="toast-stack" role="status">
            <For
                each=move || toaster.toasts().get()
                key=|toast| toast.id.clone()
                children=move |toast: Toast| {
                    let Toast { id, kind, message } = toast;
                    view! {
                        <div class=kind.class()>
                            <span>{ message }</span>
                            <button class="toast-close" on:click=move |_| toaster.dismiss(&id)>{ "×" }</button>
                        </div>
                    }
                }
            />
        </div>
    }
}
