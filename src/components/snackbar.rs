//! Transient status toast. Each page owns one handle; showing a new toast
//! bumps a generation counter so the previous auto-hide sleeper finds
//! itself stale and leaves the newer toast alone.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::future::sleep;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

const AUTO_HIDE: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, PartialEq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, PartialEq)]
pub struct Toast {
    pub text: String,
    pub kind: ToastKind,
}

#[derive(Clone)]
pub struct Snackbar {
    toast: UseStateHandle<Option<Toast>>,
    generation: Rc<RefCell<u32>>,
}

impl Snackbar {
    /// Build from hooks called in the owning component's body:
    /// `Snackbar::new(use_state(|| None), use_mut_ref(|| 0u32))`.
    pub fn new(toast: UseStateHandle<Option<Toast>>, generation: Rc<RefCell<u32>>) -> Self {
        Self { toast, generation }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.show(text.into(), ToastKind::Success);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.show(text.into(), ToastKind::Error);
    }

    fn show(&self, text: String, kind: ToastKind) {
        let id = {
            let mut generation = self.generation.borrow_mut();
            *generation = generation.wrapping_add(1);
            *generation
        };
        self.toast.set(Some(Toast { text, kind }));

        let toast = self.toast.clone();
        let generation = self.generation.clone();
        spawn_local(async move {
            sleep(AUTO_HIDE).await;
            if *generation.borrow() == id {
                toast.set(None);
            }
        });
    }

    pub fn view(&self) -> Html {
        match &*self.toast {
            Some(toast) => {
                let class = match toast.kind {
                    ToastKind::Success => {
                        "fixed bottom-6 left-1/2 -translate-x-1/2 bg-green-600 text-white px-5 py-2.5 rounded-xl shadow-lg text-sm z-50"
                    }
                    ToastKind::Error => {
                        "fixed bottom-6 left-1/2 -translate-x-1/2 bg-red-600 text-white px-5 py-2.5 rounded-xl shadow-lg text-sm z-50"
                    }
                };
                html! { <div class={class}>{ &toast.text }</div> }
            }
            None => html! {},
        }
    }
}
