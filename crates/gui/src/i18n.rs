use std::sync::atomic::{AtomicU8, Ordering};

use blueprint_viewer_lib::state::Language;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    Ru,
    En,
}

impl From<Language> for Lang {
    fn from(l: Language) -> Self {
        match l {
            Language::Ru => Lang::Ru,
            Language::En => Lang::En,
        }
    }
}

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=Ru (default)

pub fn lang() -> Lang {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Lang::En,
        _ => Lang::Ru,
    }
}

pub fn set_lang(l: Lang) {
    CURRENT_LANG.store(
        match l {
            Lang::Ru => 0,
            Lang::En => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    let ru = lang() == Lang::Ru;
    match key {
        // ── Landing page ────────────────────────────────────
        "landing.title" => if ru { "От 2D чертежа к 3D модели" } else { "From 2D drawings to 3D models" },
        "landing.subtitle" => if ru {
            "Загрузите ортогональные виды и получите объёмную CAD-модель"
        } else {
            "Upload orthographic views and get a solid CAD model"
        },
        "landing.open_workspace" => if ru { "Открыть рабочую область" } else { "Open workspace" },

        // ── Demo animation ──────────────────────────────────
        "demo.orthographic" => if ru { "2D CAD чертёж" } else { "2D CAD Drawing" },
        "demo.extrusion" => if ru { "Выдавливание…" } else { "Extruding…" },
        "demo.interactive" => if ru { "3D CAD модель" } else { "3D CAD Model" },

        // ── Workspace header ────────────────────────────────
        "header.back" => if ru { "← На главную" } else { "← Back to Home" },
        "header.title" => if ru { "3D CAD рабочая область" } else { "3D CAD Workspace" },
        "header.phase" => if ru { "Этап 1: Основа" } else { "Phase 1: Foundation" },

        // ── Menus ───────────────────────────────────────────
        "menu.model" => if ru { "Модель" } else { "Model" },
        "menu.open_model" => if ru { "Открыть модель..." } else { "Open model..." },
        "menu.open_model_title" => if ru { "Открыть glTF модель" } else { "Open glTF model" },
        "menu.clear_model" => if ru { "Убрать модель" } else { "Clear model" },
        "menu.view" => if ru { "Вид" } else { "View" },
        "menu.reset_camera" => if ru { "Сбросить камеру" } else { "Reset camera" },
        "menu.test_objects" => if ru { "Тестовые объекты" } else { "Test objects" },
        "menu.grid" => if ru { "Сетка" } else { "Grid" },
        "menu.cast_shadow" => if ru { "Отбрасывать тени" } else { "Cast shadows" },
        "menu.receive_shadow" => if ru { "Принимать тени" } else { "Receive shadows" },
        "menu.auto_center" => if ru { "Авто-центрирование" } else { "Auto-center" },
        "menu.environment" => if ru { "Окружение" } else { "Environment" },
        "menu.language" => if ru { "Язык" } else { "Language" },

        "env.city" => if ru { "Город" } else { "City" },
        "env.studio" => if ru { "Студия" } else { "Studio" },
        "env.sunset" => if ru { "Закат" } else { "Sunset" },
        "env.night" => if ru { "Ночь" } else { "Night" },

        // ── Viewer status ───────────────────────────────────
        "status.idle" => if ru { "Ожидание" } else { "Idle" },
        "status.loading" => if ru { "Загрузка" } else { "Loading" },
        "status.ready" => if ru { "Готово" } else { "Ready" },
        "status.error" => if ru { "Ошибка" } else { "Error" },

        "panel.status" => if ru { "Статус" } else { "Status" },
        "panel.content" => if ru { "Содержимое" } else { "Content" },
        "panel.progress" => if ru { "Прогресс" } else { "Progress" },
        "panel.size" => if ru { "Размер" } else { "Size" },
        "panel.objects" => if ru { "Объектов" } else { "Objects" },

        "content.none" => if ru { "Пусто" } else { "Empty" },
        "content.placeholder" => if ru { "Тестовые объекты" } else { "Test objects" },
        "content.model" => if ru { "Модель" } else { "Model" },

        // ── Overlays ────────────────────────────────────────
        "overlay.loading" => if ru { "Загрузка 3D модели..." } else { "Loading 3D model..." },
        "overlay.error_title" => if ru { "Ошибка загрузки модели:" } else { "Error loading model:" },
        "controls.title" => if ru { "Управление 3D видом" } else { "3D Viewer Controls" },
        "controls.rotate" => if ru { "• ЛКМ + перетаскивание: Вращение" } else { "• Left click + drag: Rotate" },
        "controls.pan" => if ru { "• ПКМ + перетаскивание: Панорама" } else { "• Right click + drag: Pan" },
        "controls.zoom" => if ru { "• Колесо: Масштаб" } else { "• Scroll: Zoom" },

        // ── Fallback ────────────────────────────────────────
        _ => "???",
    }
}
