//! Shared overlay shell for every dialog. Lifecycle is
//! closed → open → (validating) → closed; a validation failure keeps the
//! modal open, and the opening handler is responsible for clearing its
//! own fields.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub title: AttrValue,
    pub on_close: Callback<()>,
    pub children: Children,
}

#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };
    // Clicking the backdrop closes the dialog, like clicking outside a
    // native one; clicks inside must not bubble up to it.
    let on_backdrop = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let stop_propagation = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div class="fixed inset-0 bg-black/40 flex items-center justify-center z-40" onclick={on_backdrop}>
            <div class="bg-white rounded-2xl shadow-xl w-full max-w-md mx-4" onclick={stop_propagation}>
                <div class="flex items-center justify-between px-6 py-4 border-b border-border">
                    <h3 class="font-bold text-[#173E63] text-lg">{ &props.title }</h3>
                    <button onclick={on_close} class="text-slate-400 hover:text-slate-600 text-xl leading-none" aria-label="关闭">
                        {"×"}
                    </button>
                </div>
                <div class="px-6 py-5 space-y-4">
                    { for props.children.iter() }
                </div>
            </div>
        </div>
    }
}
