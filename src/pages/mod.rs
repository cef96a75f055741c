pub mod dashboard;
pub mod delete_account;
pub mod profile;
pub mod register;

use web_sys::InputEvent;
use yew::prelude::*;

pub(crate) fn bind_input(handle: &UseStateHandle<String>) -> Callback<InputEvent> {
    let handle = handle.clone();
    Callback::from(move |e: InputEvent| {
        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
        handle.set(input.value());
    })
}
