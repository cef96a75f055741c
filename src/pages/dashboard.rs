//! Dashboard: balance card with privacy toggle, deposit/withdraw/transfer
//! modals, recent transactions, full history and the message inbox.

use std::rc::Rc;
use std::time::Duration;

use futures::join;
use gloo_timers::future::sleep;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::Event;
use yew::prelude::*;

use crate::api;
use crate::components::modal::Modal;
use crate::components::snackbar::Snackbar;
use crate::format::{balance_text, format_money, format_time, signed_amount};
use crate::model::{recent_transactions, unread_count, Message, Transaction};
use crate::pages::bind_input;
use crate::session;
use crate::validate::{can_submit_transfer, parse_amount, validate_transfer_target};

const TRANSFER_ALERT_DELAY: Duration = Duration::from_secs(1);

#[derive(Clone, PartialEq)]
enum DashboardModal {
    None,
    Deposit,
    Withdraw,
    Transfer,
    History,
    Inbox,
    MessageDetail(Message),
}

#[derive(Clone, Copy, PartialEq)]
enum TransferStep {
    Edit,
    Confirm,
}

#[derive(Properties, PartialEq)]
pub struct DashboardProps {
    pub card: String,
}

async fn refresh_account(
    card: String,
    balance: UseStateHandle<Option<f64>>,
    transactions: UseStateHandle<Vec<Transaction>>,
) {
    let (bal, txs) = join!(api::fetch_balance(&card), api::fetch_transactions(&card));
    if let Ok(value) = bal {
        balance.set(Some(value));
    }
    if let Ok(list) = txs {
        transactions.set(list);
    }
}

/// Message list as reducer state, so a read flag flipped from a delayed
/// task still applies to whatever the list holds at dispatch time.
#[derive(PartialEq, Default)]
struct Inbox {
    items: Vec<Message>,
}

enum InboxAction {
    Load(Vec<Message>),
    MarkRead(i64),
}

impl Reducible for Inbox {
    type Action = InboxAction;

    fn reduce(self: Rc<Self>, action: InboxAction) -> Rc<Self> {
        match action {
            InboxAction::Load(items) => Rc::new(Inbox { items }),
            InboxAction::MarkRead(id) => {
                let items = self
                    .items
                    .iter()
                    .cloned()
                    .map(|mut m| {
                        if m.id == id {
                            m.is_read = 1;
                        }
                        m
                    })
                    .collect();
                Rc::new(Inbox { items })
            }
        }
    }
}

/// Opens the detail view and optimistically flips the read flag; the
/// persistence POST is fire-and-forget and only logged on failure.
fn open_message(
    message: &Message,
    modal: &UseStateHandle<DashboardModal>,
    messages: &UseReducerHandle<Inbox>,
) {
    modal.set(DashboardModal::MessageDetail(message.clone()));
    if message.is_unread() {
        messages.dispatch(InboxAction::MarkRead(message.id));

        let id = message.id;
        spawn_local(async move {
            if let Err(err) = api::mark_message_read(id).await {
                web_sys::console::error_1(&JsValue::from_str(&format!(
                    "标记消息已读失败: {}",
                    err
                )));
            }
        });
    }
}

#[function_component(DashboardPage)]
pub fn dashboard_page(props: &DashboardProps) -> Html {
    let user_name = use_state(|| "--".to_string());
    let balance = use_state(|| None::<f64>);
    let revealed = use_state(|| false);
    let transactions = use_state(Vec::<Transaction>::new);
    let messages = use_reducer(Inbox::default);
    let modal = use_state(|| DashboardModal::None);
    let submitting = use_state(|| false);

    let deposit_amount = use_state(String::new);
    let withdraw_amount = use_state(String::new);

    let transfer_to = use_state(String::new);
    let transfer_amount = use_state(String::new);
    let transfer_message = use_state(String::new);
    let transfer_anonymous = use_state(|| false);
    let transfer_recipient = use_state(|| None::<String>);
    let transfer_step = use_state(|| TransferStep::Edit);

    let history = use_state(|| None::<Vec<Transaction>>);

    let snackbar = Snackbar::new(use_state(|| None), use_mut_ref(|| 0u32));

    // Initial load: name, balance, recent transactions and messages are
    // fetched concurrently so one failing source never delays the rest.
    {
        let user_name = user_name.clone();
        let balance = balance.clone();
        let transactions = transactions.clone();
        let messages = messages.clone();
        let modal = modal.clone();
        use_effect_with_deps(
            move |card: &String| {
                let card = card.clone();
                spawn_local(async move {
                    let load_name = async {
                        match api::fetch_profile(&card).await {
                            Ok(profile) => user_name.set(profile.name),
                            Err(_) => user_name.set("用户".to_string()),
                        }
                    };
                    let load_balance = async {
                        if let Ok(value) = api::fetch_balance(&card).await {
                            balance.set(Some(value));
                        }
                    };
                    let load_transactions = async {
                        if let Ok(list) = api::fetch_transactions(&card).await {
                            transactions.set(list);
                        }
                    };
                    let (_, _, _, fetched) = join!(
                        load_name,
                        load_balance,
                        load_transactions,
                        api::fetch_messages(&card)
                    );

                    match fetched {
                        Ok(list) => {
                            messages.dispatch(InboxAction::Load(list.clone()));
                            // Once per session, the first unread transfer
                            // alert opens by itself after a short delay.
                            if session::transfer_alert_pending() {
                                if let Some(alert) =
                                    list.iter().find(|m| m.is_transfer_alert()).cloned()
                                {
                                    session::mark_transfer_alert_shown();
                                    sleep(TRANSFER_ALERT_DELAY).await;
                                    open_message(&alert, &modal, &messages);
                                }
                            }
                        }
                        Err(err) => {
                            web_sys::console::error_1(&JsValue::from_str(&format!(
                                "加载消息失败: {}",
                                err
                            )));
                        }
                    }
                });
                || ()
            },
            props.card.clone(),
        );
    }

    let close_modal = {
        let modal = modal.clone();
        Callback::from(move |_: ()| modal.set(DashboardModal::None))
    };

    let on_toggle_privacy = {
        let revealed = revealed.clone();
        Callback::from(move |_| revealed.set(!*revealed))
    };

    let open_deposit = {
        let modal = modal.clone();
        let deposit_amount = deposit_amount.clone();
        Callback::from(move |_| {
            deposit_amount.set(String::new());
            modal.set(DashboardModal::Deposit);
        })
    };

    let open_withdraw = {
        let modal = modal.clone();
        let withdraw_amount = withdraw_amount.clone();
        Callback::from(move |_| {
            withdraw_amount.set(String::new());
            modal.set(DashboardModal::Withdraw);
        })
    };

    let open_transfer = {
        let modal = modal.clone();
        let transfer_to = transfer_to.clone();
        let transfer_amount = transfer_amount.clone();
        let transfer_message = transfer_message.clone();
        let transfer_anonymous = transfer_anonymous.clone();
        let transfer_recipient = transfer_recipient.clone();
        let transfer_step = transfer_step.clone();
        Callback::from(move |_| {
            transfer_to.set(String::new());
            transfer_amount.set(String::new());
            transfer_message.set(String::new());
            transfer_anonymous.set(false);
            transfer_recipient.set(None);
            transfer_step.set(TransferStep::Edit);
            modal.set(DashboardModal::Transfer);
        })
    };

    let open_history = {
        let modal = modal.clone();
        let history = history.clone();
        let card = props.card.clone();
        let snackbar = snackbar.clone();
        Callback::from(move |_| {
            modal.set(DashboardModal::History);
            history.set(None);
            let history = history.clone();
            let card = card.clone();
            let snackbar = snackbar.clone();
            spawn_local(async move {
                match api::fetch_transactions(&card).await {
                    Ok(list) => history.set(Some(list)),
                    Err(err) => {
                        history.set(Some(Vec::new()));
                        snackbar.error(err.to_string());
                    }
                }
            });
        })
    };

    let open_inbox = {
        let modal = modal.clone();
        let messages = messages.clone();
        let card = props.card.clone();
        Callback::from(move |_| {
            modal.set(DashboardModal::Inbox);
            let messages = messages.clone();
            let card = card.clone();
            spawn_local(async move {
                if let Ok(list) = api::fetch_messages(&card).await {
                    messages.dispatch(InboxAction::Load(list));
                }
            });
        })
    };

    let on_deposit = {
        let deposit_amount = deposit_amount.clone();
        let modal = modal.clone();
        let balance = balance.clone();
        let transactions = transactions.clone();
        let submitting = submitting.clone();
        let snackbar = snackbar.clone();
        let card = props.card.clone();
        Callback::from(move |_| {
            let amount = match parse_amount(&deposit_amount) {
                Some(amount) => amount,
                None => {
                    snackbar.error("请输入有效的存款金额");
                    return;
                }
            };

            submitting.set(true);
            let modal = modal.clone();
            let balance = balance.clone();
            let transactions = transactions.clone();
            let submitting = submitting.clone();
            let snackbar = snackbar.clone();
            let card = card.clone();
            spawn_local(async move {
                match api::deposit(&card, amount).await {
                    Ok(()) => {
                        snackbar.success(format!("存款成功！金额: ¥{:.2}", amount));
                        modal.set(DashboardModal::None);
                        refresh_account(card, balance, transactions).await;
                    }
                    Err(err) => snackbar.error(err.to_string()),
                }
                submitting.set(false);
            });
        })
    };

    let on_withdraw = {
        let withdraw_amount = withdraw_amount.clone();
        let modal = modal.clone();
        let balance = balance.clone();
        let transactions = transactions.clone();
        let submitting = submitting.clone();
        let snackbar = snackbar.clone();
        let card = props.card.clone();
        Callback::from(move |_| {
            let amount = match parse_amount(&withdraw_amount) {
                Some(amount) => amount,
                None => {
                    snackbar.error("请输入有效的取款金额");
                    return;
                }
            };

            submitting.set(true);
            let modal = modal.clone();
            let balance = balance.clone();
            let transactions = transactions.clone();
            let submitting = submitting.clone();
            let snackbar = snackbar.clone();
            let card = card.clone();
            spawn_local(async move {
                match api::withdraw(&card, amount).await {
                    Ok(()) => {
                        snackbar.success(format!("取款成功！金额: ¥{:.2}", amount));
                        modal.set(DashboardModal::None);
                        refresh_account(card, balance, transactions).await;
                    }
                    Err(err) => snackbar.error(err.to_string()),
                }
                submitting.set(false);
            });
        })
    };

    // Pre-fills the withdraw field from the loaded balance.
    let on_withdraw_all = {
        let withdraw_amount = withdraw_amount.clone();
        let balance = balance.clone();
        let snackbar = snackbar.clone();
        Callback::from(move |_| match *balance {
            Some(value) if value > 0.0 => withdraw_amount.set(format!("{:.2}", value)),
            _ => snackbar.error("余额为 0"),
        })
    };

    // Step one of the transfer flow: recipient lookup.
    let on_transfer_query = {
        let transfer_to = transfer_to.clone();
        let transfer_amount = transfer_amount.clone();
        let transfer_recipient = transfer_recipient.clone();
        let transfer_step = transfer_step.clone();
        let submitting = submitting.clone();
        let snackbar = snackbar.clone();
        let card = props.card.clone();
        Callback::from(move |_| {
            let to_card = transfer_to.trim().to_string();
            if let Err(msg) = validate_transfer_target(&card, &to_card) {
                snackbar.error(msg);
                return;
            }
            if parse_amount(&transfer_amount).is_none() {
                snackbar.error("请输入有效的转账金额");
                return;
            }

            submitting.set(true);
            let transfer_recipient = transfer_recipient.clone();
            let transfer_step = transfer_step.clone();
            let submitting = submitting.clone();
            let snackbar = snackbar.clone();
            spawn_local(async move {
                match api::fetch_user_name(&to_card).await {
                    Ok(name) => {
                        transfer_recipient.set(Some(name));
                        transfer_step.set(TransferStep::Confirm);
                    }
                    Err(err) => snackbar.error(err.to_string()),
                }
                submitting.set(false);
            });
        })
    };

    let on_transfer_back = {
        let transfer_step = transfer_step.clone();
        Callback::from(move |_| transfer_step.set(TransferStep::Edit))
    };

    // Step three: the actual submission, gated on a successful query.
    let on_transfer_submit = {
        let transfer_to = transfer_to.clone();
        let transfer_amount = transfer_amount.clone();
        let transfer_message = transfer_message.clone();
        let transfer_anonymous = transfer_anonymous.clone();
        let transfer_recipient = transfer_recipient.clone();
        let modal = modal.clone();
        let balance = balance.clone();
        let transactions = transactions.clone();
        let submitting = submitting.clone();
        let snackbar = snackbar.clone();
        let card = props.card.clone();
        Callback::from(move |_| {
            if let Err(msg) = can_submit_transfer(transfer_recipient.as_deref()) {
                snackbar.error(msg);
                return;
            }
            let amount = match parse_amount(&transfer_amount) {
                Some(amount) => amount,
                None => {
                    snackbar.error("请输入有效的转账金额");
                    return;
                }
            };

            submitting.set(true);
            let to_card = transfer_to.trim().to_string();
            let note = transfer_message.trim().to_string();
            let anonymous = *transfer_anonymous;
            let modal = modal.clone();
            let balance = balance.clone();
            let transactions = transactions.clone();
            let submitting = submitting.clone();
            let snackbar = snackbar.clone();
            let card = card.clone();
            spawn_local(async move {
                match api::transfer(&card, &to_card, amount, &note, anonymous).await {
                    Ok(()) => {
                        snackbar.success(format!("转账成功！金额: ¥{:.2}", amount));
                        modal.set(DashboardModal::None);
                        refresh_account(card, balance, transactions).await;
                    }
                    Err(err) => snackbar.error(err.to_string()),
                }
                submitting.set(false);
            });
        })
    };

    let on_toggle_anonymous = {
        let transfer_anonymous = transfer_anonymous.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            transfer_anonymous.set(input.checked());
        })
    };

    // Editing the target card invalidates the previous recipient query.
    let on_transfer_to_input = {
        let transfer_to = transfer_to.clone();
        let transfer_recipient = transfer_recipient.clone();
        Callback::from(move |e: web_sys::InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            transfer_to.set(input.value());
            transfer_recipient.set(None);
        })
    };

    let unread = unread_count(&messages.items);
    let balance_display = balance_text(*balance, *revealed);

    let transaction_row = |tx: &Transaction| {
        let class = tx.class();
        html! {
            <div class="flex flex-col gap-1 py-3 border-b border-border last:border-b-0">
                <div class="flex items-center justify-between">
                    <span class={classes!("text-sm", "font-bold", class.color_class())}>{ class.label() }</span>
                    <span class={classes!("text-sm", "font-semibold", class.color_class())}>{ signed_amount(class, tx.amount) }</span>
                </div>
                <div class="flex items-center justify-between text-xs text-slate-400">
                    <span>{ format_time(&tx.create_time) }</span>
                    <span>{ format!("余额: {}", format_money(tx.balance_after)) }</span>
                </div>
                {
                    match tx.description.as_deref() {
                        Some(desc) if !desc.is_empty() => html! {
                            <span class="text-xs text-slate-500">{ desc }</span>
                        },
                        _ => html! {},
                    }
                }
            </div>
        }
    };

    let modal_view = match &*modal {
        DashboardModal::None => html! {},
        DashboardModal::Deposit => html! {
            <Modal title="存款" on_close={close_modal.clone()}>
                <p class="text-sm text-slate-500">{ format!("当前余额: {}", (*balance).map(format_money).unwrap_or_else(|| "--".to_string())) }</p>
                <input type="number" placeholder="请输入存款金额" value={(*deposit_amount).clone()}
                    oninput={bind_input(&deposit_amount)}
                    class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm border-none" />
                <button onclick={on_deposit} disabled={*submitting}
                    class="w-full bg-[#173E63] text-white py-2.5 rounded-[10px] text-sm font-bold">
                    { if *submitting { "处理中..." } else { "确认存款" } }
                </button>
            </Modal>
        },
        DashboardModal::Withdraw => html! {
            <Modal title="取款" on_close={close_modal.clone()}>
                <p class="text-sm text-slate-500">{ format!("当前余额: {}", (*balance).map(format_money).unwrap_or_else(|| "--".to_string())) }</p>
                <div class="flex gap-2">
                    <input type="number" placeholder="请输入取款金额" value={(*withdraw_amount).clone()}
                        oninput={bind_input(&withdraw_amount)}
                        class="flex-1 bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm border-none" />
                    <button onclick={on_withdraw_all}
                        class="bg-[#B2CBDE] text-[#173E63] px-3 rounded-[10px] text-xs font-bold">
                        {"全部取出"}
                    </button>
                </div>
                <button onclick={on_withdraw} disabled={*submitting}
                    class="w-full bg-[#173E63] text-white py-2.5 rounded-[10px] text-sm font-bold">
                    { if *submitting { "处理中..." } else { "确认取款" } }
                </button>
            </Modal>
        },
        DashboardModal::Transfer => {
            let body = match *transfer_step {
                TransferStep::Edit => html! {
                    <>
                        <input placeholder="对方卡号" value={(*transfer_to).clone()}
                            oninput={on_transfer_to_input}
                            class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm border-none" />
                        <input type="number" placeholder="转账金额" value={(*transfer_amount).clone()}
                            oninput={bind_input(&transfer_amount)}
                            class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm border-none" />
                        <input placeholder="转账留言（可选）" value={(*transfer_message).clone()}
                            oninput={bind_input(&transfer_message)}
                            class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm border-none" />
                        <label class="flex items-center gap-2 text-sm text-slate-600">
                            <input type="checkbox" checked={*transfer_anonymous} onchange={on_toggle_anonymous} />
                            {"匿名转账"}
                        </label>
                        <button onclick={on_transfer_query} disabled={*submitting}
                            class="w-full bg-[#173E63] text-white py-2.5 rounded-[10px] text-sm font-bold">
                            { if *submitting { "查询中..." } else { "下一步" } }
                        </button>
                    </>
                },
                TransferStep::Confirm => html! {
                    <>
                        <div class="bg-[#f1f4f9] rounded-[10px] p-4 space-y-2 text-sm">
                            <div class="flex justify-between">
                                <span class="text-slate-500">{"收款人"}</span>
                                <span class="font-bold text-[#173E63]">{ transfer_recipient.as_deref().unwrap_or("--") }</span>
                            </div>
                            <div class="flex justify-between">
                                <span class="text-slate-500">{"收款卡号"}</span>
                                <span class="font-bold text-[#173E63]">{ transfer_to.trim() }</span>
                            </div>
                            <div class="flex justify-between">
                                <span class="text-slate-500">{"转账金额"}</span>
                                <span class="font-bold text-red-600">{
                                    parse_amount(&transfer_amount).map(format_money).unwrap_or_else(|| "--".to_string())
                                }</span>
                            </div>
                        </div>
                        <div class="flex gap-3">
                            <button onclick={on_transfer_back}
                                class="flex-1 bg-[#B2CBDE] text-[#173E63] py-2.5 rounded-[10px] text-sm font-bold">
                                {"返回"}
                            </button>
                            <button onclick={on_transfer_submit} disabled={*submitting}
                                class="flex-1 bg-[#173E63] text-white py-2.5 rounded-[10px] text-sm font-bold">
                                { if *submitting { "处理中..." } else { "确认转账" } }
                            </button>
                        </div>
                    </>
                },
            };
            html! { <Modal title="转账" on_close={close_modal.clone()}>{ body }</Modal> }
        }
        DashboardModal::History => html! {
            <Modal title="交易记录" on_close={close_modal.clone()}>
                <div class="max-h-96 overflow-y-auto">
                    {
                        match &*history {
                            None => html! { <p class="text-sm text-slate-400 text-center py-6">{"加载中..."}</p> },
                            Some(list) if list.is_empty() => html! {
                                <p class="text-sm text-slate-400 text-center py-6">{"暂无交易记录"}</p>
                            },
                            Some(list) => html! {
                                <table class="w-full text-left border-collapse text-sm">
                                    <thead>
                                        <tr class="text-slate-400 text-xs">
                                            <th class="py-2 font-bold">{"时间"}</th>
                                            <th class="py-2 font-bold">{"类型"}</th>
                                            <th class="py-2 font-bold text-right">{"金额"}</th>
                                            <th class="py-2 font-bold text-right">{"余额"}</th>
                                            <th class="py-2 font-bold">{"备注"}</th>
                                        </tr>
                                    </thead>
                                    <tbody class="divide-y divide-border">
                                        { for list.iter().map(|tx| {
                                            let class = tx.class();
                                            html! {
                                                <tr>
                                                    <td class="py-2 text-slate-500">{ format_time(&tx.create_time) }</td>
                                                    <td class={classes!("py-2", "font-bold", class.color_class())}>{ class.label() }</td>
                                                    <td class={classes!("py-2", "text-right", class.color_class())}>{ signed_amount(class, tx.amount) }</td>
                                                    <td class="py-2 text-right text-slate-500">{ format_money(tx.balance_after) }</td>
                                                    <td class="py-2 text-slate-500">{ tx.description.clone().unwrap_or_else(|| "-".to_string()) }</td>
                                                </tr>
                                            }
                                        }) }
                                    </tbody>
                                </table>
                            },
                        }
                    }
                </div>
            </Modal>
        },
        DashboardModal::Inbox => html! {
            <Modal title="消息中心" on_close={close_modal.clone()}>
                <div class="max-h-96 overflow-y-auto divide-y divide-border">
                    {
                        if messages.items.is_empty() {
                            html! { <p class="text-sm text-slate-400 text-center py-6">{"暂无消息"}</p> }
                        } else {
                            html! {
                                <>
                                    { for messages.items.iter().map(|message| {
                                        let on_open = {
                                            let message = message.clone();
                                            let modal = modal.clone();
                                            let messages = messages.clone();
                                            Callback::from(move |_| {
                                                open_message(&message, &modal, &messages);
                                            })
                                        };
                                        let title_class = if message.is_unread() {
                                            "text-sm font-bold text-[#173E63]"
                                        } else {
                                            "text-sm text-slate-500"
                                        };
                                        html! {
                                            <div onclick={on_open} class="py-3 cursor-pointer hover:bg-slate-50 px-1">
                                                <div class="flex items-center justify-between">
                                                    <span class={title_class}>
                                                        { if message.kind == "transfer" { "转账通知" } else { "系统消息" } }
                                                        { if message.is_unread() {
                                                            html! { <span class="ml-2 inline-block w-2 h-2 bg-red-500 rounded-full"></span> }
                                                        } else { html! {} } }
                                                    </span>
                                                    <span class="text-xs text-slate-400">{ format_time(&message.create_time) }</span>
                                                </div>
                                                <p class="text-xs text-slate-500 mt-1 truncate">{ &message.content }</p>
                                            </div>
                                        }
                                    }) }
                                </>
                            }
                        }
                    }
                </div>
            </Modal>
        },
        DashboardModal::MessageDetail(message) => html! {
            <Modal title={ if message.kind == "transfer" { "转账通知" } else { "系统消息" } } on_close={close_modal.clone()}>
                <div class="space-y-3 text-sm">
                    <div class="flex justify-between">
                        <span class="text-slate-500">{"发送人"}</span>
                        <span class="font-bold text-[#173E63]">{ message.sender_name.as_deref().unwrap_or("匿名用户") }</span>
                    </div>
                    {
                        match message.amount {
                            Some(amount) => html! {
                                <div class="flex justify-between">
                                    <span class="text-slate-500">{"金额"}</span>
                                    <span class="font-bold text-green-600">{ format!("+{}", format_money(amount)) }</span>
                                </div>
                            },
                            None => html! {},
                        }
                    }
                    <p class="bg-[#f1f4f9] rounded-[10px] p-3 text-slate-600">{ &message.content }</p>
                    <p class="text-xs text-slate-400 text-right">{ format_time(&message.create_time) }</p>
                </div>
            </Modal>
        },
    };

    html! {
        <div class="p-6 max-w-3xl mx-auto space-y-6">
            <div class="bg-[#173E63] rounded-[24px] p-6 text-white shadow-lg">
                <div class="flex items-center justify-between">
                    <div>
                        <p class="text-sm text-slate-300">{ format!("{}，您好", *user_name) }</p>
                        <p class="text-xs text-slate-400 mt-1">{ &props.card }</p>
                    </div>
                    <button onclick={open_inbox} class="relative p-2 hover:bg-white/10 rounded-full" aria-label="消息">
                        {"🔔"}
                        {
                            if unread > 0 {
                                html! {
                                    <span class="absolute -top-1 -right-1 bg-red-500 text-white text-[10px] rounded-full px-1.5">
                                        { unread }
                                    </span>
                                }
                            } else { html! {} }
                        }
                    </button>
                </div>
                <div class="mt-6 flex items-center gap-3">
                    <span class="text-3xl font-bold tracking-tight">{ balance_display }</span>
                    <button onclick={on_toggle_privacy} class="text-xs bg-white/10 px-2 py-1 rounded-lg">
                        { if *revealed { "隐藏" } else { "显示" } }
                    </button>
                </div>
            </div>

            <div class="grid grid-cols-4 gap-3">
                <button onclick={open_deposit} class="bg-white rounded-[10px] py-4 shadow-sm border border-border text-sm font-bold text-[#173E63]">{"存款"}</button>
                <button onclick={open_withdraw} class="bg-white rounded-[10px] py-4 shadow-sm border border-border text-sm font-bold text-[#173E63]">{"取款"}</button>
                <button onclick={open_transfer} class="bg-white rounded-[10px] py-4 shadow-sm border border-border text-sm font-bold text-[#173E63]">{"转账"}</button>
                <button onclick={open_history} class="bg-white rounded-[10px] py-4 shadow-sm border border-border text-sm font-bold text-[#173E63]">{"交易记录"}</button>
            </div>

            <div class="bg-white rounded-[10px] shadow-sm border border-border p-6">
                <h3 class="font-bold text-[#173E63] mb-2">{"最近交易"}</h3>
                {
                    if transactions.is_empty() {
                        html! { <p class="text-sm text-slate-400 py-4 text-center">{"暂无交易记录"}</p> }
                    } else {
                        html! { <>{ for recent_transactions(&transactions).iter().map(transaction_row) }</> }
                    }
                }
            </div>

            { modal_view }
            { snackbar.view() }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: i64, is_read: i64) -> Message {
        Message {
            id,
            kind: "transfer".to_string(),
            content: "收到转账".to_string(),
            is_read,
            create_time: "2024-02-01 12:00:00".to_string(),
            sender_name: None,
            amount: Some(50.0),
        }
    }

    #[test]
    fn mark_read_flips_only_the_target_message() {
        let inbox = Rc::new(Inbox {
            items: vec![message(1, 0), message(2, 0)],
        });
        let inbox = inbox.reduce(InboxAction::MarkRead(2));
        assert!(inbox.items[0].is_unread());
        assert!(!inbox.items[1].is_unread());
    }

    #[test]
    fn delayed_mark_read_keeps_reads_made_in_the_meantime() {
        // A message read while the alert delay was still pending must not
        // come back unread when the alert finally opens.
        let inbox = Rc::new(Inbox {
            items: vec![message(1, 0), message(2, 0)],
        });
        let inbox = inbox.reduce(InboxAction::MarkRead(1));
        let inbox = inbox.reduce(InboxAction::MarkRead(2));
        assert!(inbox.items.iter().all(|m| !m.is_unread()));
    }

    #[test]
    fn load_replaces_the_whole_list() {
        let inbox = Rc::new(Inbox {
            items: vec![message(1, 0)],
        });
        let inbox = inbox.reduce(InboxAction::Load(vec![message(3, 1)]));
        assert_eq!(inbox.items.len(), 1);
        assert_eq!(inbox.items[0].id, 3);
    }
}
