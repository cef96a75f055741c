//! Account opening: card availability check gates submission, form rules
//! run in fixed order, and success redirects to login after a short delay.

use std::time::Duration;

use gloo_timers::future::sleep;
use wasm_bindgen_futures::spawn_local;
use web_sys::InputEvent;
use yew::prelude::*;

use crate::api;
use crate::components::snackbar::Snackbar;
use crate::pages::bind_input;
use crate::validate::{is_checkable_card_number, validate_registration, RegistrationForm};
use crate::Page;

const REDIRECT_DELAY: Duration = Duration::from_secs(3);

#[derive(Properties, PartialEq)]
pub struct RegisterProps {
    pub on_navigate: Callback<Page>,
}

#[function_component(RegisterPage)]
pub fn register_page(props: &RegisterProps) -> Html {
    let name = use_state(String::new);
    let id_card = use_state(String::new);
    let phone = use_state(String::new);
    let address = use_state(String::new);
    let card_number = use_state(String::new);
    let password = use_state(String::new);
    let confirm_password = use_state(String::new);
    let initial_deposit = use_state(String::new);

    // None until a round trip has confirmed availability; editing the
    // card number resets it.
    let availability = use_state(|| None::<bool>);
    let checking = use_state(|| false);
    let submitting = use_state(|| false);

    let snackbar = Snackbar::new(use_state(|| None), use_mut_ref(|| 0u32));

    let on_card_input = {
        let card_number = card_number.clone();
        let availability = availability.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            card_number.set(input.value());
            availability.set(None);
        })
    };

    let on_check_card = {
        let card_number = card_number.clone();
        let availability = availability.clone();
        let checking = checking.clone();
        let snackbar = snackbar.clone();
        Callback::from(move |_| {
            let card = card_number.trim().to_string();
            if card.is_empty() {
                snackbar.error("请输入卡号");
                return;
            }
            if !is_checkable_card_number(&card) {
                snackbar.error("卡号长度不足,不可小于16位且大于19位");
                return;
            }

            checking.set(true);
            let availability = availability.clone();
            let checking = checking.clone();
            let snackbar = snackbar.clone();
            spawn_local(async move {
                match api::check_card(&card).await {
                    Ok(available) => availability.set(Some(available)),
                    Err(err) => snackbar.error(format!("检查卡号失败: {}", err)),
                }
                checking.set(false);
            });
        })
    };

    let on_submit = {
        let name = name.clone();
        let id_card = id_card.clone();
        let phone = phone.clone();
        let address = address.clone();
        let card_number = card_number.clone();
        let password = password.clone();
        let confirm_password = confirm_password.clone();
        let initial_deposit = initial_deposit.clone();
        let availability = availability.clone();
        let submitting = submitting.clone();
        let snackbar = snackbar.clone();
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form = RegistrationForm {
                name: (*name).clone(),
                id_card: (*id_card).clone(),
                phone: (*phone).clone(),
                address: (*address).clone(),
                card_number: (*card_number).clone(),
                password: (*password).clone(),
                confirm_password: (*confirm_password).clone(),
                initial_deposit: (*initial_deposit).clone(),
            };

            let deposit = match validate_registration(&form) {
                Ok(deposit) => deposit,
                Err(msg) => {
                    snackbar.error(msg);
                    return;
                }
            };
            if *availability != Some(true) {
                snackbar.error("请先检查卡号可用性");
                return;
            }
            if form.password != form.confirm_password {
                snackbar.error("两次输入的密码不一致");
                return;
            }

            submitting.set(true);
            let submitting = submitting.clone();
            let snackbar = snackbar.clone();
            let on_navigate = on_navigate.clone();
            spawn_local(async move {
                match api::register(&form, deposit).await {
                    Ok(assigned_card) => {
                        snackbar.success(format!("开户成功！您的卡号是: {}", assigned_card));
                        sleep(REDIRECT_DELAY).await;
                        on_navigate.emit(Page::Login);
                    }
                    Err(err) => snackbar.error(format!("开户失败: {}", err)),
                }
                submitting.set(false);
            });
        })
    };

    let on_back = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_| on_navigate.emit(Page::Login))
    };

    let availability_view = match *availability {
        Some(true) => html! { <span class="text-xs text-green-600 font-bold">{"✅ 卡号可用"}</span> },
        Some(false) => html! { <span class="text-xs text-red-600 font-bold">{"❌ 卡号已存在"}</span> },
        None => html! {},
    };

    let field_class = "w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm border-none";

    html! {
        <div class="min-h-screen bg-background flex items-center justify-center p-6">
            <div class="bg-white rounded-2xl shadow-xl w-full max-w-md p-8">
                <h1 class="text-2xl font-black text-[#173E63] mb-6 text-center">{"开户申请"}</h1>
                <form onsubmit={on_submit} class="space-y-3">
                    <input placeholder="姓名" value={(*name).clone()} oninput={bind_input(&name)} class={field_class} />
                    <input placeholder="18位身份证号" value={(*id_card).clone()} oninput={bind_input(&id_card)} class={field_class} />
                    <input placeholder="11位手机号码" value={(*phone).clone()} oninput={bind_input(&phone)} class={field_class} />
                    <input placeholder="联系地址（可选）" value={(*address).clone()} oninput={bind_input(&address)} class={field_class} />
                    <div class="flex gap-2 items-center">
                        <input placeholder="卡号（16-19位）" value={(*card_number).clone()} oninput={on_card_input} class={field_class} />
                        <button type="button" onclick={on_check_card} disabled={*checking}
                            class="shrink-0 bg-[#B2CBDE] text-[#173E63] px-3 py-2 rounded-[10px] text-xs font-bold">
                            { if *checking { "检查中..." } else { "检查可用性" } }
                        </button>
                    </div>
                    { availability_view }
                    <input type="password" placeholder="密码（至少6位）" value={(*password).clone()} oninput={bind_input(&password)} class={field_class} />
                    <input type="password" placeholder="确认密码" value={(*confirm_password).clone()} oninput={bind_input(&confirm_password)} class={field_class} />
                    <input type="number" placeholder="初始存款金额" value={(*initial_deposit).clone()} oninput={bind_input(&initial_deposit)} class={field_class} />
                    <button type="submit" disabled={*submitting}
                        class="w-full bg-[#173E63] text-white py-2.5 rounded-[10px] text-sm font-bold">
                        { if *submitting { "开户中..." } else { "立即开户" } }
                    </button>
                </form>
                <button onclick={on_back} class="w-full mt-3 text-sm text-slate-500 hover:text-[#173E63]">
                    {"返回登录"}
                </button>
            </div>
            { snackbar.view() }
        </div>
    }
}
