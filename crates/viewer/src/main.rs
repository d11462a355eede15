mod api;
mod state;

use gloo::events::EventListener;
use saco_catalog::query::share_link;
use saco_catalog::{Design, GarmentColor, Slot, GARMENT_COLORS};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use state::*;

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}

// ─── App Component ──────────────────────────────────────────────────

#[function_component(App)]
fn app() -> Html {
    let store = use_reducer(Store::default);

    // Category list and URL restore on mount
    {
        let store = store.clone();
        use_effect_with((), move |_| {
            store.dispatch(Action::LoadCategories);
            store.dispatch(Action::Restore(current_query()));
            || ()
        });
    }

    // Back/forward navigation re-reads the URL
    {
        let dispatcher = store.dispatcher();
        use_effect_with((), move |_| {
            let listener = web_sys::window().map(|window| {
                EventListener::new(&window, "popstate", move |_| {
                    dispatcher.dispatch(Action::Restore(current_query()));
                })
            });
            move || drop(listener)
        });
    }

    // Run the category fetch the configurator asks for
    {
        let dispatcher = store.dispatcher();
        use_effect_with(store.0.pending_categories(), move |ticket| {
            if let Some(ticket) = *ticket {
                wasm_bindgen_futures::spawn_local(async move {
                    let result = api::fetch_categories().await;
                    dispatcher.dispatch(Action::CategoriesLoaded { ticket, result });
                });
            }
            || ()
        });
    }

    // Run the design-list fetch; stale answers are dropped by the reducer
    {
        let dispatcher = store.dispatcher();
        use_effect_with(store.0.pending_designs().cloned(), move |request| {
            if let Some(request) = request.clone() {
                wasm_bindgen_futures::spawn_local(async move {
                    let result = api::fetch_designs(&request.category).await;
                    dispatcher.dispatch(Action::DesignsLoaded {
                        ticket: request.ticket,
                        result,
                    });
                });
            }
            || ()
        });
    }

    // Write user changes back to the address bar
    {
        let query = store.0.query_string();
        use_effect_with(store.0.url_revision(), move |revision| {
            if *revision > 0 {
                replace_query(&query);
            }
            || ()
        });
    }

    // ─── Callbacks ──────────────────────────────────────────────────

    let on_category_change = {
        let dispatcher = store.dispatcher();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let value = select.value();
            dispatcher.dispatch(Action::SelectCategory(
                (!value.is_empty()).then_some(value),
            ));
        })
    };

    let on_toggle = {
        let dispatcher = store.dispatcher();
        Callback::from(move |(design, slot): (Design, Slot)| {
            dispatcher.dispatch(Action::ToggleDesign(design, slot));
        })
    };

    let on_color = {
        let dispatcher = store.dispatcher();
        Callback::from(move |color: GarmentColor| dispatcher.dispatch(Action::SelectColor(color)))
    };

    let on_flip = {
        let dispatcher = store.dispatcher();
        let other = store.0.selection().view.opposite();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(Action::SwitchView(other)))
    };

    let on_retry = {
        let dispatcher = store.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(Action::Retry))
    };

    let on_share = Callback::from(|_: MouseEvent| {
        open_in_new_tab(&share_link(&current_href()));
    });

    // ─── Render ─────────────────────────────────────────────────────

    let configurator = &store.0;
    let selection = configurator.selection();
    let category = selection.category.as_deref();
    let current = selection.current_design();

    html! {
        <div class="app">
            <header class="app-header">
                <h1>{"Sacos personalizados"}</h1>
            </header>

            if let Some(err) = configurator.error() {
                <div class="error-banner">
                    <span>{err}</span>
                    <button onclick={on_retry}>{"Reintentar"}</button>
                </div>
            }

            <main class="layout">
                <section class="panel">
                    <label class="menu-label" for="anime-select">{"Anime"}</label>
                    <select id="anime-select" onchange={on_category_change}>
                        <option value="" selected={category.is_none()}>{"Selecciona un anime"}</option>
                        {for configurator.categories().iter().map(|c| html! {
                            <option value={c.id.clone()} selected={category == Some(c.id.as_str())}>
                                {&c.name}
                            </option>
                        })}
                    </select>

                    <ColorPicker selected={selection.color} on_select={on_color} />

                    if configurator.is_loading() {
                        <div class="loading">{"Cargando..."}</div>
                    }

                    if category.is_some() && !configurator.is_loading() && configurator.designs().is_empty() {
                        <div class="empty">{"No hay diseños para este anime"}</div>
                    }

                    <div class="design-grid">
                        {for configurator.designs().iter().map(|design| html! {
                            <DesignCard
                                design={design.clone()}
                                src={api::image_src(category, &design.filename)}
                                front={selection.front.as_ref().is_some_and(|d| d.id == design.id)}
                                back={selection.back.as_ref().is_some_and(|d| d.id == design.id)}
                                on_toggle={on_toggle.clone()}
                            />
                        })}
                    </div>
                </section>

                <section class="preview">
                    <div class="garment">
                        <img class="garment-base" src={selection.garment_image_url()} alt={selection.color.name} />
                        if let Some(design) = current {
                            <img class={classes!("garment-print", format!("print-{}", selection.view.asset_name()))}
                                src={api::image_src(category, &design.filename)}
                                alt={design.name.clone()} />
                        }
                    </div>
                    <div class="preview-summary">
                        <SlotSummary slot={Slot::Front} design={selection.front.clone()} />
                        <SlotSummary slot={Slot::Back} design={selection.back.clone()} />
                    </div>
                    <div class="preview-actions">
                        <button class="flip-btn" onclick={on_flip}>
                            {format!("Ver {}", selection.view.other_view_label())}
                        </button>
                        <button class="share-btn" onclick={on_share}>{"Compartir"}</button>
                    </div>
                </section>
            </main>
        </div>
    }
}

// ─── Helper Components ──────────────────────────────────────────────

#[derive(Properties, PartialEq)]
struct ColorPickerProps {
    selected: GarmentColor,
    on_select: Callback<GarmentColor>,
}

#[function_component(ColorPicker)]
fn color_picker(props: &ColorPickerProps) -> Html {
    html! {
        <div class="color-picker">
            <span class="menu-label">{format!("Color: {}", props.selected.name)}</span>
            <div class="flexbox">
                {for GARMENT_COLORS.iter().map(|color| {
                    let color = *color;
                    let onclick = {
                        let cb = props.on_select.clone();
                        Callback::from(move |_: MouseEvent| cb.emit(color))
                    };
                    html! {
                        <button
                            class={classes!("swatch", (color == props.selected).then_some("depressed"))}
                            style={format!("background: {};", color.hex)}
                            title={color.name}
                            {onclick}
                        ></button>
                    }
                })}
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct DesignCardProps {
    design: Design,
    src: AttrValue,
    front: bool,
    back: bool,
    on_toggle: Callback<(Design, Slot)>,
}

#[function_component(DesignCard)]
fn design_card(props: &DesignCardProps) -> Html {
    let button = |slot: Slot, active: bool| {
        let cb = props.on_toggle.clone();
        let design = props.design.clone();
        let onclick = Callback::from(move |_: MouseEvent| cb.emit((design.clone(), slot)));
        html! {
            <button class={classes!("slot-btn", active.then_some("depressed"))} {onclick}>
                {slot.label()}
            </button>
        }
    };
    html! {
        <div class={classes!("design-card", (props.front || props.back).then_some("selected"))}>
            <img src={props.src.clone()} alt={props.design.name.clone()} loading="lazy" />
            <div class="design-name">{&props.design.name}</div>
            <div class="button-container">
                {button(Slot::Front, props.front)}
                {button(Slot::Back, props.back)}
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SlotSummaryProps {
    slot: Slot,
    design: Option<Design>,
}

#[function_component(SlotSummary)]
fn slot_summary(props: &SlotSummaryProps) -> Html {
    html! {
        <div class="slot-summary">
            <span class="slot-label">{format!("{}: ", props.slot.label())}</span>
            <span>{props.design.as_ref().map(|d| d.name.clone()).unwrap_or_else(|| "sin diseño".to_string())}</span>
        </div>
    }
}
