//! Expressie Calculator entry point
//!
//! Handles platform-specific initialization and wires input to the app.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlInputElement};

    use expressie_calculator::App;
    use expressie_calculator::calc::{OperationColor, display_value};
    use expressie_calculator::consts::{EXPORT_FILENAME, EXPORT_MIME_TYPE};
    use expressie_calculator::export::download_file;
    use expressie_calculator::platform::time::{local_time_string, now_millis};
    use expressie_calculator::platform::{KeyValueStore, LocalStorage, MemoryStore};

    type Shared = Rc<RefCell<App<Box<dyn KeyValueStore>>>>;

    fn current_document() -> Document {
        web_sys::window()
            .and_then(|w| w.document())
            .expect("no document")
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn apply_dark_mode(document: &Document, dark: bool) {
        if let Some(root) = document.document_element() {
            let _ = root.class_list().toggle_with_force("dark", dark);
        }
    }

    /// Push the current app state into the DOM
    fn render(app: &App<Box<dyn KeyValueStore>>) {
        let document = current_document();
        let current = app.current();

        set_text(
            &document,
            "random-value",
            &display_value(current.random_value).to_string(),
        );
        set_text(&document, "getal1", &current.operand_a.to_string());
        set_text(&document, "getal2", &current.operand_b.to_string());
        set_text(&document, "operation-expr", &current.to_string());
        if let Some(el) = document.get_element_by_id("operation-name") {
            el.set_text_content(Some(current.operation.name));
            el.set_class_name(&current.operation.color.text_class());
        }

        let max = app.settings().max_number;
        set_text(&document, "max-number-label", &max.to_string());
        if let Some(input) = document
            .get_element_by_id("max-number")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            input.set_value(&max.to_string());
        }

        render_history(&document, app);
    }

    fn render_history(document: &Document, app: &App<Box<dyn KeyValueStore>>) {
        let history = app.history();

        // Panel stays hidden until something is recorded
        if let Some(panel) = document.get_element_by_id("history") {
            let class = if history.is_empty() { "hidden" } else { "" };
            let _ = panel.set_attribute("class", class);
        }
        set_text(document, "history-count", &history.len().to_string());

        let Some(list) = document.get_element_by_id("history-list") else {
            return;
        };
        list.set_text_content(None);

        for (index, entry) in history.entries().iter().enumerate() {
            let Ok(item) = document.create_element("li") else {
                continue;
            };
            let mut class = format!(
                "history-item {}",
                OperationColor::for_symbol(&entry.operation_symbol).text_class()
            );
            if index == 0 {
                class.push_str(" latest");
            }
            if entry.result.is_infinity() {
                class.push_str(" error");
            }
            item.set_class_name(&class);
            item.set_text_content(Some(&format!(
                "{}. {}  ({}, {})",
                index + 1,
                entry.expression_text(),
                entry.operation_name,
                entry.timestamp
            )));
            let _ = list.append_child(&item);
        }
    }

    fn open_storage() -> Box<dyn KeyValueStore> {
        match LocalStorage::open() {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                log::warn!("{}, history will not persist", e);
                Box::new(MemoryStore::new())
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Expressie Calculator starting...");

        let seed = js_sys::Date::now() as u64;
        let app = match App::new(open_storage(), seed) {
            Ok(app) => app,
            Err(e) => {
                log::error!("Failed to start calculator: {}", e);
                return;
            }
        };
        log::info!("Calculator initialized with seed: {}", seed);

        let document = current_document();
        apply_dark_mode(&document, app.settings().dark_mode);

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let app: Shared = Rc::new(RefCell::new(app));
        render(&app.borrow());

        setup_generate_button(&document, app.clone());
        setup_max_number_slider(&document, app.clone());
        setup_export_button(&document, app.clone());
        setup_dark_mode_button(&document, app);

        log::info!("Expressie Calculator running!");
    }

    fn setup_generate_button(document: &Document, app: Shared) {
        if let Some(btn) = document.get_element_by_id("generate-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                if let Err(e) = a.generate_new(now_millis(), local_time_string()) {
                    log::error!("Generation failed: {}", e);
                }
                render(&a);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_max_number_slider(document: &Document, app: Shared) {
        let Some(input) = document
            .get_element_by_id("max-number")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        let input_clone = input.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Ok(value) = input_clone.value().parse::<u32>() else {
                return;
            };
            let mut a = app.borrow_mut();
            a.set_max_number(value);
            render(&a);
        });
        let _ = input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_export_button(document: &Document, app: Shared) {
        if let Some(btn) = document.get_element_by_id("export-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let csv = app.borrow().export_csv();
                if let Err(e) = download_file(&csv, EXPORT_FILENAME, EXPORT_MIME_TYPE) {
                    log::error!("Export failed: {:?}", e);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_dark_mode_button(document: &Document, app: Shared) {
        if let Some(btn) = document.get_element_by_id("dark-mode-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let dark = app.borrow_mut().toggle_dark_mode();
                apply_dark_mode(&current_document(), dark);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

/// Data directory used when none is given on the command line
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_DATA_DIR: &str = ".expressie";

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use expressie_calculator::App;
    use expressie_calculator::export::write_csv;
    use expressie_calculator::platform::FileStore;
    use expressie_calculator::platform::time::{local_time_string, now_millis};

    env_logger::init();
    log::info!("Expressie Calculator (native) starting...");

    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

    let mut app = match App::new(FileStore::new(&dir), now_millis()) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Failed to start calculator: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match app.generate_new(now_millis(), local_time_string()) {
        Ok(entry) => println!("{}  ({})", entry.expression_text(), entry.operation_name),
        Err(e) => {
            log::error!("Generation failed: {}", e);
            return ExitCode::FAILURE;
        }
    }

    println!("\nGeschiedenis ({}):", app.history().len());
    for (index, entry) in app.history().entries().iter().enumerate() {
        println!(
            "{:>2}. {:<24} {}",
            index + 1,
            entry.expression_text(),
            entry.timestamp
        );
    }

    match write_csv(&dir, app.history().entries()) {
        Ok(path) => println!("\nExported to {}", path.display()),
        Err(e) => log::error!("Export failed: {}", e),
    }

    ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
