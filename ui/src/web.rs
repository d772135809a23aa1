use crate::status_class_name;
use checktable_business::{
    CheckboxCell, ClientConfig, Status, TableSession, TableView, fetch_table, today, update_cell,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlElement, HtmlInputElement};

type SharedSession = Rc<RefCell<TableSession>>;

/// Elements of `index.html` the client drives.
struct Page {
    head: Element,
    body: Element,
    status: HtmlElement,
    loading: HtmlElement,
    refresh: HtmlButtonElement,
}

impl Page {
    fn find(document: &Document) -> Result<Self, JsValue> {
        let table = by_id::<Element>(document, "task-table")?;
        let head = table
            .query_selector("thead")?
            .ok_or_else(|| JsValue::from_str("#task-table has no <thead>"))?;
        let body = table
            .query_selector("tbody")?
            .ok_or_else(|| JsValue::from_str("#task-table has no <tbody>"))?;

        Ok(Self {
            head,
            body,
            status: by_id(document, "status")?,
            loading: by_id(document, "loading")?,
            refresh: by_id(document, "refresh")?,
        })
    }

    fn render(&self, view: &TableView) {
        self.head.set_inner_html(&view.head_html());
        self.body.set_inner_html(&view.body_html());
    }

    /// The checkbox currently rendered for a cell. A reload replaces the
    /// inputs, so the one a click came from may no longer be in the page.
    fn checkbox_input(&self, row_id: &str, column_key: &str) -> Option<HtmlInputElement> {
        let inputs = self.body.query_selector_all("input[type=checkbox]").ok()?;
        (0..inputs.length())
            .filter_map(|i| inputs.item(i))
            .filter_map(|node| node.dyn_into::<HtmlInputElement>().ok())
            .find(|input| {
                input.get_attribute("data-row-id").as_deref() == Some(row_id)
                    && input.get_attribute("data-column-key").as_deref() == Some(column_key)
            })
    }

    fn show_status(&self, status: &Status) {
        self.status.set_text_content(Some(&status.message));
        self.status.set_class_name(&status_class_name(status));
    }

    fn show_loading(&self, loading: bool) {
        self.loading.set_hidden(!loading);
        self.refresh.set_disabled(loading);
    }
}

fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Element #{id} has an unexpected type")))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    crate::logger::init(log::LevelFilter::Debug);

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("No document"))?;
    let page = Rc::new(Page::find(&document)?);
    let session: SharedSession = Rc::new(RefCell::new(TableSession::new(ClientConfig::default())));

    {
        let (click_page, click_session) = (page.clone(), session.clone());
        let on_click = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            spawn_local(load_and_render(click_page.clone(), click_session.clone(), true));
        });
        page.refresh
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }

    {
        // one listener on <tbody> survives every re-render of its rows
        let (change_page, change_session) = (page.clone(), session.clone());
        let on_change = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(input) = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            let (Some(row_id), Some(column_key)) = (
                input.get_attribute("data-row-id"),
                input.get_attribute("data-column-key"),
            ) else {
                return;
            };
            spawn_local(toggle(
                change_page.clone(),
                change_session.clone(),
                input,
                row_id,
                column_key,
            ));
        });
        page.body
            .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;
        on_change.forget();
    }

    spawn_local(load_and_render(page, session, false));
    Ok(())
}

async fn load_and_render(page: Rc<Page>, session: SharedSession, announce: bool) {
    let api_url = {
        let mut session = session.borrow_mut();
        session.begin_load();
        session.config().api_url()
    };
    page.show_loading(true);

    let result = fetch_table(&api_url).await;

    let redraw = session.borrow_mut().finish_load(result, announce);
    let session = session.borrow();
    if redraw {
        page.render(session.view());
    }
    page.show_status(session.status());
    page.show_loading(session.is_loading());
}

async fn toggle(
    page: Rc<Page>,
    session: SharedSession,
    input: HtmlInputElement,
    row_id: String,
    column_key: String,
) {
    let begun = session
        .borrow_mut()
        .begin_toggle(&row_id, &column_key, input.checked(), today());
    let pending = match begun {
        Ok(pending) => pending,
        Err(e) => {
            log::warn!("Ignoring toggle: {e}");
            if let Some(cell) = session.borrow().cell(&row_id, &column_key) {
                apply_cell(&input, cell);
            }
            return;
        }
    };

    let api_url = {
        let session = session.borrow();
        if let Some(cell) = session.cell(&row_id, &column_key) {
            apply_cell(&input, cell);
        }
        session.config().api_url()
    };

    let result = update_cell(
        &api_url,
        &pending.row_id,
        &pending.column_key,
        &pending.desired_value,
    )
    .await;

    session.borrow_mut().finish_toggle(&pending, result);
    let input = page.checkbox_input(&row_id, &column_key).unwrap_or(input);
    let session = session.borrow();
    match session.cell(&row_id, &column_key) {
        Some(cell) => apply_cell(&input, cell),
        None => input.set_disabled(false),
    }
    page.show_status(session.status());
}

/// Copies a cell's state onto its input and the date label next to it.
fn apply_cell(input: &HtmlInputElement, cell: &CheckboxCell) {
    input.set_checked(cell.checked);
    input.set_disabled(cell.disabled);
    if let Some(label) = input.next_element_sibling() {
        label.set_text_content(Some(&cell.label));
    }
}
