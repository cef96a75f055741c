//! Account Console: browser frontend for the online-banking demo backend.
//! Single-page Yew app; each page is an independent controller over one
//! endpoint group, gated by the session-stored card number.

mod api;
mod components;
mod format;
mod model;
mod pages;
mod session;
mod validate;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use components::snackbar::Snackbar;
use pages::bind_input;
use pages::dashboard::DashboardPage;
use pages::delete_account::DeleteAccountPage;
use pages::profile::ProfilePage;
use pages::register::RegisterPage;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Page {
    Login,
    Register,
    Dashboard,
    Profile,
    DeleteAccount,
}

impl Page {
    pub fn requires_session(self) -> bool {
        matches!(self, Page::Dashboard | Page::Profile | Page::DeleteAccount)
    }
}

#[derive(Properties, PartialEq)]
struct LayoutProps {
    active_page: Page,
    on_navigate: Callback<Page>,
    children: Children,
}

#[function_component(Layout)]
fn layout(props: &LayoutProps) -> Html {
    let nav_items = [
        ("账户总览", Page::Dashboard),
        ("个人资料", Page::Profile),
        ("注销账户", Page::DeleteAccount),
    ];

    let on_logout = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_| {
            session::clear();
            on_navigate.emit(Page::Login);
        })
    };

    html! {
        <div class="min-h-screen bg-background">
            <header class="bg-[#D8E1E8] border-b border-border h-14 flex items-center justify-between px-6">
                <span class="text-[#173E63] text-lg font-black tracking-tight">{"网上银行"}</span>
                <nav class="flex items-center gap-2">
                    { for nav_items.iter().map(|(label, page)| {
                        let is_active = *page == props.active_page;
                        let class_name = if is_active {
                            "px-3 py-1.5 rounded-lg text-sm font-bold bg-[#173E63] text-white"
                        } else {
                            "px-3 py-1.5 rounded-lg text-sm font-medium text-[#173E63] hover:bg-white/60"
                        };
                        let on_navigate = props.on_navigate.clone();
                        let page = *page;
                        html! {
                            <button class={class_name} onclick={Callback::from(move |_| on_navigate.emit(page))}>
                                { *label }
                            </button>
                        }
                    }) }
                    <button onclick={on_logout} class="px-3 py-1.5 rounded-lg text-sm font-medium text-slate-500 hover:text-red-600">
                        {"退出登录"}
                    </button>
                </nav>
            </header>
            <main>
                { for props.children.iter() }
            </main>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct LoginProps {
    on_navigate: Callback<Page>,
}

#[function_component(LoginPage)]
fn login_page(props: &LoginProps) -> Html {
    let card_number = use_state(String::new);
    let password = use_state(String::new);
    let submitting = use_state(|| false);
    let snackbar = Snackbar::new(use_state(|| None), use_mut_ref(|| 0u32));

    let on_submit = {
        let card_number = card_number.clone();
        let password = password.clone();
        let submitting = submitting.clone();
        let snackbar = snackbar.clone();
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let card = card_number.trim().to_string();
            let password_val = (*password).clone();
            if card.is_empty() || password_val.is_empty() {
                snackbar.error("请输入卡号和密码");
                return;
            }

            submitting.set(true);
            let submitting = submitting.clone();
            let snackbar = snackbar.clone();
            let on_navigate = on_navigate.clone();
            spawn_local(async move {
                match api::login(&card, &password_val).await {
                    Ok(_balance) => {
                        session::store_card_number(&card);
                        on_navigate.emit(Page::Dashboard);
                    }
                    Err(err) => snackbar.error(err.to_string()),
                }
                submitting.set(false);
            });
        })
    };

    let on_register = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_| on_navigate.emit(Page::Register))
    };

    html! {
        <div class="min-h-screen bg-background flex items-center justify-center p-6">
            <div class="bg-white rounded-2xl shadow-xl w-full max-w-sm p-8">
                <h1 class="text-2xl font-black text-[#173E63] mb-6 text-center">{"网上银行"}</h1>
                <form onsubmit={on_submit} class="space-y-3">
                    <input placeholder="卡号" value={(*card_number).clone()} oninput={bind_input(&card_number)}
                        class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm border-none" />
                    <input type="password" placeholder="密码" value={(*password).clone()} oninput={bind_input(&password)}
                        class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm border-none" />
                    <button type="submit" disabled={*submitting}
                        class="w-full bg-[#173E63] text-white py-2.5 rounded-[10px] text-sm font-bold">
                        { if *submitting { "登录中..." } else { "登录" } }
                    </button>
                </form>
                <button onclick={on_register} class="w-full mt-3 text-sm text-slate-500 hover:text-[#173E63]">
                    {"还没有账户？立即开户"}
                </button>
            </div>
            { snackbar.view() }
        </div>
    }
}

#[function_component(App)]
fn app() -> Html {
    let page = use_state(|| session::resolve_page(Page::Dashboard, session::card_number().is_some()));

    let on_navigate = {
        let page = page.clone();
        Callback::from(move |next: Page| {
            page.set(session::resolve_page(next, session::card_number().is_some()));
        })
    };

    match *page {
        Page::Login => html! { <LoginPage on_navigate={on_navigate} /> },
        Page::Register => html! { <RegisterPage on_navigate={on_navigate} /> },
        protected => match session::card_number() {
            // The guard is terminal: no session means the protected page
            // never mounts and nothing is fetched.
            None => html! { <LoginPage on_navigate={on_navigate} /> },
            Some(card) => {
                let content = match protected {
                    Page::Profile => html! { <ProfilePage card={card} /> },
                    Page::DeleteAccount => html! {
                        <DeleteAccountPage card={card} on_navigate={on_navigate.clone()} />
                    },
                    _ => html! { <DashboardPage card={card} /> },
                };
                html! {
                    <Layout active_page={protected} on_navigate={on_navigate}>
                        { content }
                    </Layout>
                }
            }
        },
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
