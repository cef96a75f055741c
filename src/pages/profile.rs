//! Profile: account details with the same masked-balance pattern as the
//! dashboard, plus the edit and password-change modals.

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::components::modal::Modal;
use crate::components::snackbar::Snackbar;
use crate::format::{balance_text, format_time};
use crate::model::Profile;
use crate::pages::bind_input;
use crate::validate::{validate_password_change, validate_profile_update};

#[derive(Clone, Copy, PartialEq)]
enum ProfileModal {
    None,
    Edit,
    Password,
}

#[derive(Properties, PartialEq)]
pub struct ProfileProps {
    pub card: String,
}

#[function_component(ProfilePage)]
pub fn profile_page(props: &ProfileProps) -> Html {
    let profile = use_state(|| None::<Profile>);
    let revealed = use_state(|| false);
    let modal = use_state(|| ProfileModal::None);
    let submitting = use_state(|| false);
    // Bumped after a successful update to re-run the loader.
    let reload = use_state(|| 0u32);

    let edit_name = use_state(String::new);
    let edit_id_card = use_state(String::new);
    let edit_phone = use_state(String::new);
    let edit_address = use_state(String::new);

    let old_password = use_state(String::new);
    let new_password = use_state(String::new);
    let confirm_password = use_state(String::new);

    let snackbar = Snackbar::new(use_state(|| None), use_mut_ref(|| 0u32));

    {
        let profile = profile.clone();
        let snackbar = snackbar.clone();
        use_effect_with_deps(
            move |(card, _): &(String, u32)| {
                let card = card.clone();
                spawn_local(async move {
                    match api::fetch_profile(&card).await {
                        Ok(loaded) => profile.set(Some(loaded)),
                        Err(err) => snackbar.error(err.to_string()),
                    }
                });
                || ()
            },
            (props.card.clone(), *reload),
        );
    }

    let close_modal = {
        let modal = modal.clone();
        Callback::from(move |_: ()| modal.set(ProfileModal::None))
    };

    let on_toggle_privacy = {
        let revealed = revealed.clone();
        Callback::from(move |_| revealed.set(!*revealed))
    };

    let open_edit = {
        let modal = modal.clone();
        let profile = profile.clone();
        let edit_name = edit_name.clone();
        let edit_id_card = edit_id_card.clone();
        let edit_phone = edit_phone.clone();
        let edit_address = edit_address.clone();
        Callback::from(move |_| {
            if let Some(current) = &*profile {
                edit_name.set(current.name.clone());
                edit_id_card.set(current.id_card.clone());
                edit_phone.set(current.phone.clone());
                edit_address.set(current.address.clone().unwrap_or_default());
                modal.set(ProfileModal::Edit);
            }
        })
    };

    let open_password = {
        let modal = modal.clone();
        let old_password = old_password.clone();
        let new_password = new_password.clone();
        let confirm_password = confirm_password.clone();
        Callback::from(move |_| {
            old_password.set(String::new());
            new_password.set(String::new());
            confirm_password.set(String::new());
            modal.set(ProfileModal::Password);
        })
    };

    let on_save_profile = {
        let edit_name = edit_name.clone();
        let edit_id_card = edit_id_card.clone();
        let edit_phone = edit_phone.clone();
        let edit_address = edit_address.clone();
        let modal = modal.clone();
        let submitting = submitting.clone();
        let reload = reload.clone();
        let snackbar = snackbar.clone();
        let card = props.card.clone();
        Callback::from(move |_| {
            let name = edit_name.trim().to_string();
            let id_card = edit_id_card.trim().to_string();
            let phone = edit_phone.trim().to_string();
            let address = edit_address.trim().to_string();
            if let Err(msg) = validate_profile_update(&name, &id_card, &phone) {
                snackbar.error(msg);
                return;
            }

            submitting.set(true);
            let next_reload = reload.wrapping_add(1);
            let modal = modal.clone();
            let submitting = submitting.clone();
            let reload = reload.clone();
            let snackbar = snackbar.clone();
            let card = card.clone();
            spawn_local(async move {
                match api::update_profile(&card, &name, &id_card, &phone, &address).await {
                    Ok(()) => {
                        snackbar.success("资料已更新");
                        modal.set(ProfileModal::None);
                        reload.set(next_reload);
                    }
                    Err(err) => snackbar.error(err.to_string()),
                }
                submitting.set(false);
            });
        })
    };

    let on_change_password = {
        let old_password = old_password.clone();
        let new_password = new_password.clone();
        let confirm_password = confirm_password.clone();
        let modal = modal.clone();
        let submitting = submitting.clone();
        let snackbar = snackbar.clone();
        let card = props.card.clone();
        Callback::from(move |_| {
            if let Err(msg) =
                validate_password_change(&old_password, &new_password, &confirm_password)
            {
                snackbar.error(msg);
                return;
            }

            submitting.set(true);
            let old_value = (*old_password).clone();
            let new_value = (*new_password).clone();
            let modal = modal.clone();
            let submitting = submitting.clone();
            let snackbar = snackbar.clone();
            let card = card.clone();
            spawn_local(async move {
                match api::change_password(&card, &old_value, &new_value).await {
                    Ok(()) => {
                        snackbar.success("密码修改成功");
                        modal.set(ProfileModal::None);
                    }
                    Err(err) => snackbar.error(err.to_string()),
                }
                submitting.set(false);
            });
        })
    };

    let info_row = |label: &'static str, value: String| {
        html! {
            <div class="flex items-center justify-between py-3 border-b border-border last:border-b-0">
                <span class="text-sm text-slate-500">{ label }</span>
                <span class="text-sm font-bold text-[#173E63]">{ value }</span>
            </div>
        }
    };

    let modal_view = match *modal {
        ProfileModal::None => html! {},
        ProfileModal::Edit => html! {
            <Modal title="编辑资料" on_close={close_modal.clone()}>
                <input placeholder="姓名" value={(*edit_name).clone()} oninput={bind_input(&edit_name)}
                    class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm border-none" />
                <input placeholder="身份证号" value={(*edit_id_card).clone()} oninput={bind_input(&edit_id_card)}
                    class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm border-none" />
                <input placeholder="手机号码" value={(*edit_phone).clone()} oninput={bind_input(&edit_phone)}
                    class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm border-none" />
                <input placeholder="联系地址（可选）" value={(*edit_address).clone()} oninput={bind_input(&edit_address)}
                    class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm border-none" />
                <button onclick={on_save_profile} disabled={*submitting}
                    class="w-full bg-[#173E63] text-white py-2.5 rounded-[10px] text-sm font-bold">
                    { if *submitting { "保存中..." } else { "保存" } }
                </button>
            </Modal>
        },
        ProfileModal::Password => html! {
            <Modal title="修改密码" on_close={close_modal.clone()}>
                <input type="password" placeholder="原密码" value={(*old_password).clone()} oninput={bind_input(&old_password)}
                    class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm border-none" />
                <input type="password" placeholder="新密码" value={(*new_password).clone()} oninput={bind_input(&new_password)}
                    class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm border-none" />
                <input type="password" placeholder="确认新密码" value={(*confirm_password).clone()} oninput={bind_input(&confirm_password)}
                    class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm border-none" />
                <button onclick={on_change_password} disabled={*submitting}
                    class="w-full bg-[#173E63] text-white py-2.5 rounded-[10px] text-sm font-bold">
                    { if *submitting { "提交中..." } else { "确认修改" } }
                </button>
            </Modal>
        },
    };

    html! {
        <div class="p-6 max-w-3xl mx-auto space-y-6">
            {
                match &*profile {
                    None => html! { <p class="text-sm text-slate-400 text-center py-10">{"加载中..."}</p> },
                    Some(current) => html! {
                        <>
                            <div class="bg-[#173E63] rounded-[24px] p-6 text-white shadow-lg">
                                <p class="text-sm text-slate-300">{"账户余额"}</p>
                                <div class="mt-2 flex items-center gap-3">
                                    <span class="text-3xl font-bold tracking-tight">{ balance_text(Some(current.balance), *revealed) }</span>
                                    <button onclick={on_toggle_privacy} class="text-xs bg-white/10 px-2 py-1 rounded-lg">
                                        { if *revealed { "隐藏" } else { "显示" } }
                                    </button>
                                </div>
                            </div>

                            <div class="bg-white rounded-[10px] shadow-sm border border-border p-6">
                                <div class="flex items-center justify-between mb-2">
                                    <h3 class="font-bold text-[#173E63]">{"基本信息"}</h3>
                                    <div class="flex gap-2">
                                        <button onclick={open_edit} class="text-xs bg-[#B2CBDE] text-[#173E63] px-3 py-1.5 rounded-lg font-bold">{"编辑资料"}</button>
                                        <button onclick={open_password} class="text-xs bg-[#B2CBDE] text-[#173E63] px-3 py-1.5 rounded-lg font-bold">{"修改密码"}</button>
                                    </div>
                                </div>
                                { info_row("姓名", current.name.clone()) }
                                { info_row("身份证号", current.id_card.clone()) }
                                { info_row("手机号码", current.phone.clone()) }
                                { info_row("联系地址", current.address.clone().unwrap_or_else(|| "未填写".to_string())) }
                                { info_row("卡号", current.card_number.clone()) }
                                { info_row("开户时间", format_time(&current.create_time)) }
                            </div>
                        </>
                    },
                }
            }

            { modal_view }
            { snackbar.view() }
        </div>
    }
}
