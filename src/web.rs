// Browser bridge: JSON commands in, JSON snapshots out, and a
// requestAnimationFrame loop that drives every timer.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{Value, json};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::app::{App, AppConfig, AppError, Command};
use crate::speech::BrowserSpeech;

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn performance_now() -> f64 {
    window().and_then(|w| w.performance()).map(|p| p.now()).unwrap_or(0.0)
}

fn ok(result: Value) -> Value {
    json!({ "ok": true, "result": result })
}

fn err(code: &str, message: impl Into<String>) -> Value {
    json!({ "ok": false, "error": { "code": code, "message": message.into() } })
}

fn snapshot_value(app: &App) -> Result<Value, JsValue> {
    serde_json::to_value(app.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn with_app<R>(f: impl FnOnce(&mut App) -> Result<R, JsValue>) -> Result<R, JsValue> {
    APP.with(|cell| match cell.borrow_mut().as_mut() {
        Some(app) => f(app),
        None => Err(JsValue::from_str("app not started; call start_app() first")),
    })
}

/// Create the app (once) and start the frame loop.
#[wasm_bindgen]
pub fn start_app() -> Result<(), JsValue> {
    let fresh = APP.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_some() {
            return false;
        }
        *slot = Some(App::new(AppConfig::default(), Box::new(BrowserSpeech)));
        true
    });
    if fresh {
        log::info!("vowel-quest started");
        start_loop()?;
    }
    Ok(())
}

/// Apply one JSON command such as `{"type":"login","email":"…","password":"…"}`.
/// Returns `{"ok":true,"result":<snapshot>}` or `{"ok":false,"error":{…}}`.
#[wasm_bindgen]
pub fn dispatch(command_json: &str) -> Result<String, JsValue> {
    let command: Command =
        serde_json::from_str(command_json).map_err(|e| JsValue::from_str(&format!("bad command: {e}")))?;
    let now = performance_now();
    with_app(|app| {
        let reply = match app.dispatch(command, now) {
            Ok(()) => ok(snapshot_value(app)?),
            Err(AppError::Login(e)) => err("login", e.to_string()),
        };
        Ok(reply.to_string())
    })
}

#[wasm_bindgen]
pub fn snapshot() -> Result<String, JsValue> {
    with_app(|app| Ok(ok(snapshot_value(app)?).to_string()))
}

fn start_loop() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        APP.with(|cell| {
            if let Some(app) = cell.borrow_mut().as_mut() {
                app.tick(ts);
            }
        });
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(cb) = g.borrow().as_ref() {
        win.request_animation_frame(cb.as_ref().unchecked_ref())?;
    }
    Ok(())
}
