use crate::shared::modal_frame::ModalFrame;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use std::sync::Arc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;

type ModalBuilder = Arc<dyn Fn(ModalHandle) -> AnyView + Send + Sync>;
type CloseGuard = Arc<dyn Fn() -> bool + Send + Sync>;

#[derive(Clone)]
struct ModalEntry {
    id: u64,
    builder: ModalBuilder,
    modal_style: Option<String>,
    modal_class: Option<String>,
    can_close: Option<CloseGuard>,
}

/// Lets a modal close itself.
#[derive(Clone, Copy)]
pub struct ModalHandle {
    id: u64,
    svc: ModalStackService,
}

impl ModalHandle {
    pub fn close(&self) {
        self.svc.close_deferred(self.id);
    }
}

/// Stack of open modals (details forms, pickers). Escape closes the top one.
#[derive(Clone, Copy)]
pub struct ModalStackService {
    stack: RwSignal<Vec<ModalEntry>>,
    next_id: RwSignal<u64>,
}

impl Default for ModalStackService {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalStackService {
    pub fn new() -> Self {
        Self {
            stack: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(1),
        }
    }

    /// Runs `f` on the next tick, after the triggering DOM event is done.
    fn defer(&self, f: impl FnOnce(ModalStackService) + 'static) {
        let svc = *self;
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            f(svc);
        });
    }

    pub fn is_open(&self) -> bool {
        self.stack.with(|s| !s.is_empty())
    }

    /// Push a modal with style/class overrides for its surface.
    pub fn push_with_frame<F>(
        &self,
        modal_style: Option<String>,
        modal_class: Option<String>,
        builder: F,
    ) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        self.push_with_frame_guard(modal_style, modal_class, None, builder)
    }

    /// Same as [`push_with_frame`](Self::push_with_frame); while `can_close`
    /// returns false, overlay clicks and Escape are ignored.
    pub fn push_with_frame_guard<F>(
        &self,
        modal_style: Option<String>,
        modal_class: Option<String>,
        can_close: Option<CloseGuard>,
        builder: F,
    ) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);

        self.stack.update(|s| {
            s.push(ModalEntry {
                id,
                builder: Arc::new(builder),
                modal_style,
                modal_class,
                can_close,
            });
        });

        ModalHandle { id, svc: *self }
    }

    pub fn close(&self, id: u64) {
        self.stack.update(|s| s.retain(|e| e.id != id));
    }

    pub fn close_deferred(&self, id: u64) {
        self.defer(move |svc| svc.close(id));
    }

    fn top_can_close(&self) -> bool {
        self.stack
            .with_untracked(|s| s.last().and_then(|e| e.can_close.clone()))
            .map(|f| f())
            .unwrap_or(true)
    }

    pub fn pop_deferred(&self) {
        self.defer(|svc| {
            svc.stack.update(|s| {
                s.pop();
            })
        });
    }

    pub fn clear(&self) {
        self.stack.set(Vec::new());
    }
}

/// Renders the modal stack. Mounted once at the application root.
#[component]
pub fn ModalHost() -> impl IntoView {
    let svc = use_context::<ModalStackService>()
        .expect("ModalStackService not provided in context (provide it in app root)");

    Effect::new(move |_| {
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            if let Some(keyboard_event) = event.dyn_ref::<KeyboardEvent>() {
                if keyboard_event.key() == "Escape" && svc.is_open() && svc.top_can_close() {
                    svc.pop_deferred();
                }
            }
        }) as Box<dyn FnMut(_)>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            // lives as long as the app
            closure.forget();
        }
    });

    view! {
        <Show when=move || svc.is_open()>
            <For
                each=move || {
                    svc.stack
                        .get()
                        .into_iter()
                        .enumerate()
                        .collect::<Vec<(usize, ModalEntry)>>()
                }
                key=|(_, entry)| entry.id
                children=move |(idx, entry)| {
                    let z_index = 1000 + idx as i32;
                    let id = entry.id;
                    let can_close = entry.can_close.clone();
                    let on_close = Callback::new(move |_| {
                        if can_close.as_ref().map(|f| f()).unwrap_or(true) {
                            svc.close_deferred(id);
                        }
                    });

                    let content = (entry.builder)(ModalHandle { id, svc });

                    view! {
                        <ModalFrame
                            z_index=z_index
                            on_close=on_close
                            modal_style=entry.modal_style.clone().unwrap_or_default()
                            modal_class=entry.modal_class.clone().unwrap_or_default()
                        >
                            {content}
                        </ModalFrame>
                    }
                }
            />
        </Show>
    }
}
