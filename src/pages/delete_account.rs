//! Account deletion: identity verification, then a confirmation dialog
//! whose confirm button is countdown-gated for five seconds. The sleeper
//! is generation-guarded; re-opening the dialog restarts the countdown
//! and orphans the previous one.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::future::sleep;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::api::ApiError;
use crate::components::modal::Modal;
use crate::components::snackbar::Snackbar;
use crate::format::format_money;
use crate::pages::bind_input;
use crate::session;
use crate::Page;

const COUNTDOWN_SECONDS: u8 = 5;

#[derive(Properties, PartialEq)]
pub struct DeleteAccountProps {
    pub card: String,
    pub on_navigate: Callback<Page>,
}

#[derive(Clone, PartialEq)]
struct VerifiedAccount {
    card: String,
    name: String,
    balance: f64,
}

fn bump(generation: &Rc<RefCell<u32>>) -> u32 {
    let mut value = generation.borrow_mut();
    *value = value.wrapping_add(1);
    *value
}

/// One `remaining` value per elapsed second, ending at zero.
fn countdown_ticks() -> impl Iterator<Item = u8> {
    (0..COUNTDOWN_SECONDS).rev()
}

/// Label and enabled flag of the confirm button for a countdown value.
fn confirm_button_state(remaining: u8) -> (String, bool) {
    if remaining == 0 {
        ("确定注销".to_string(), true)
    } else {
        (format!("确定 ({})", remaining), false)
    }
}

#[function_component(DeleteAccountPage)]
pub fn delete_account_page(props: &DeleteAccountProps) -> Html {
    let form_card = use_state(String::new);
    let form_name = use_state(String::new);
    let form_phone = use_state(String::new);

    let verified = use_state(|| None::<VerifiedAccount>);
    // Some(n) while the dialog is open; the button unlocks at zero.
    let countdown = use_state(|| None::<u8>);
    let countdown_gen = use_mut_ref(|| 0u32);
    let submitting = use_state(|| false);

    let snackbar = Snackbar::new(use_state(|| None), use_mut_ref(|| 0u32));

    let start_countdown = {
        let countdown = countdown.clone();
        let countdown_gen = countdown_gen.clone();
        move || {
            let id = bump(&countdown_gen);
            countdown.set(Some(COUNTDOWN_SECONDS));
            let countdown = countdown.clone();
            let countdown_gen = countdown_gen.clone();
            spawn_local(async move {
                for remaining in countdown_ticks() {
                    sleep(Duration::from_secs(1)).await;
                    if *countdown_gen.borrow() != id {
                        return;
                    }
                    countdown.set(Some(remaining));
                }
            });
        }
    };

    let on_verify = {
        let form_card = form_card.clone();
        let form_name = form_name.clone();
        let form_phone = form_phone.clone();
        let verified = verified.clone();
        let submitting = submitting.clone();
        let snackbar = snackbar.clone();
        let start_countdown = start_countdown.clone();
        Callback::from(move |_| {
            let card = form_card.trim().to_string();
            let name = form_name.trim().to_string();
            let phone = form_phone.trim().to_string();
            if card.is_empty() || name.is_empty() || phone.is_empty() {
                snackbar.error("请填写所有信息");
                return;
            }

            submitting.set(true);
            let verified = verified.clone();
            let submitting = submitting.clone();
            let snackbar = snackbar.clone();
            let start_countdown = start_countdown.clone();
            spawn_local(async move {
                match api::account_check(&card, &name, &phone).await {
                    Ok(balance) => {
                        verified.set(Some(VerifiedAccount {
                            card,
                            name,
                            balance,
                        }));
                        start_countdown();
                    }
                    Err(ApiError::Server(_)) => snackbar.error("验证失败：信息不匹配"),
                    Err(err) => snackbar.error(err.to_string()),
                }
                submitting.set(false);
            });
        })
    };

    let close_confirm = {
        let verified = verified.clone();
        let countdown = countdown.clone();
        let countdown_gen = countdown_gen.clone();
        Callback::from(move |_: ()| {
            bump(&countdown_gen);
            countdown.set(None);
            verified.set(None);
        })
    };

    let on_execute_delete = {
        let verified = verified.clone();
        let countdown = countdown.clone();
        let countdown_gen = countdown_gen.clone();
        let submitting = submitting.clone();
        let snackbar = snackbar.clone();
        let on_navigate = props.on_navigate.clone();
        let card = props.card.clone();
        Callback::from(move |_| {
            submitting.set(true);
            let verified = verified.clone();
            let countdown = countdown.clone();
            let countdown_gen = countdown_gen.clone();
            let submitting = submitting.clone();
            let snackbar = snackbar.clone();
            let on_navigate = on_navigate.clone();
            let card = card.clone();
            spawn_local(async move {
                match api::account_delete(&card).await {
                    Ok(()) => {
                        session::clear();
                        snackbar.success("账户已成功注销，即将返回登录页");
                        sleep(Duration::from_millis(1500)).await;
                        on_navigate.emit(Page::Login);
                    }
                    Err(_) => {
                        snackbar.error("注销失败，请联系管理员");
                        bump(&countdown_gen);
                        countdown.set(None);
                        verified.set(None);
                    }
                }
                submitting.set(false);
            });
        })
    };

    let field_class = "w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm border-none";

    let confirm_view = match (&*verified, *countdown) {
        (Some(account), Some(remaining)) => {
            let (label, ready) = confirm_button_state(remaining);
            let confirm_button = if ready {
                html! {
                    <button onclick={on_execute_delete.clone()} disabled={*submitting}
                        class="flex-1 bg-red-600 text-white py-2.5 rounded-[10px] text-sm font-bold">
                        { if *submitting { "注销中...".to_string() } else { label } }
                    </button>
                }
            } else {
                html! {
                    <button disabled={true}
                        class="flex-1 bg-slate-400 text-white py-2.5 rounded-[10px] text-sm font-bold">
                        { label }
                    </button>
                }
            };

            html! {
                <Modal title="确认注销" on_close={close_confirm.clone()}>
                    <div class="space-y-2 text-sm">
                        <div class="flex justify-between">
                            <span class="text-slate-500">{"卡号"}</span>
                            <span class="font-bold text-[#173E63]">{ &account.card }</span>
                        </div>
                        <div class="flex justify-between">
                            <span class="text-slate-500">{"姓名"}</span>
                            <span class="font-bold text-[#173E63]">{ &account.name }</span>
                        </div>
                    </div>
                    {
                        if account.balance > 0.0 {
                            html! {
                                <div class="bg-amber-50 border border-amber-200 rounded-[10px] p-3 text-xs text-amber-700">
                                    { format!("该账户仍有余额 {}，注销后余额将无法找回。", format_money(account.balance)) }
                                </div>
                            }
                        } else {
                            html! {}
                        }
                    }
                    <p class="text-xs text-slate-500">{"注销后账户数据将被永久删除，且无法恢复。"}</p>
                    <div class="flex gap-3">
                        <button onclick={Callback::from({
                            let close_confirm = close_confirm.clone();
                            move |_| close_confirm.emit(())
                        })} class="flex-1 bg-[#B2CBDE] text-[#173E63] py-2.5 rounded-[10px] text-sm font-bold">
                            {"取消"}
                        </button>
                        { confirm_button }
                    </div>
                </Modal>
            }
        }
        _ => html! {},
    };

    html! {
        <div class="p-6 max-w-md mx-auto space-y-6">
            <div class="bg-white rounded-[10px] shadow-sm border border-border p-6 space-y-3">
                <h3 class="font-bold text-[#173E63]">{"注销账户"}</h3>
                <p class="text-xs text-slate-500">{"请输入开户时登记的信息以验证身份。"}</p>
                <input placeholder="卡号" value={(*form_card).clone()} oninput={bind_input(&form_card)} class={field_class} />
                <input placeholder="姓名" value={(*form_name).clone()} oninput={bind_input(&form_name)} class={field_class} />
                <input placeholder="手机号码" value={(*form_phone).clone()} oninput={bind_input(&form_phone)} class={field_class} />
                <button onclick={on_verify} disabled={*submitting}
                    class="w-full bg-red-600 text-white py-2.5 rounded-[10px] text-sm font-bold">
                    { if *submitting { "验证中..." } else { "验证并注销" } }
                </button>
            </div>

            { confirm_view }
            { snackbar.view() }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_button_is_inert_until_zero() {
        for remaining in 1..=COUNTDOWN_SECONDS {
            let (label, ready) = confirm_button_state(remaining);
            assert!(!ready);
            assert_eq!(label, format!("确定 ({})", remaining));
        }
        assert_eq!(confirm_button_state(0), ("确定注销".to_string(), true));
    }

    #[test]
    fn countdown_spans_five_full_seconds_per_open() {
        // Each dialog open starts at 5; a tick follows every one-second
        // sleep, so the button only unlocks after the fifth.
        let states: Vec<(String, bool)> =
            countdown_ticks().map(confirm_button_state).collect();
        assert_eq!(states.len(), COUNTDOWN_SECONDS as usize);
        assert!(states[..states.len() - 1].iter().all(|(_, ready)| !ready));
        assert!(states[states.len() - 1].1);
        assert!(!confirm_button_state(COUNTDOWN_SECONDS).1);
    }
}
