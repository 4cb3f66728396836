use std::fmt;

use serde::{Deserialize, Serialize};

pub mod geometry;
pub mod ortho;

/// Непрозрачный идентификатор 3D-ресурса (URL или путь)
pub type Locator = String;

/// Метаданные загруженной модели (размер и центр ограничивающего бокса)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelLoadMeta {
    pub size: [f32; 3],
    /// Центр до авто-центрирования
    pub center: [f32; 3],
}

impl ModelLoadMeta {
    /// Размеры в виде "x × y × z" с заданной точностью
    pub fn format_size(&self, precision: usize) -> String {
        let [x, y, z] = self.size;
        format!("{x:.precision$} × {y:.precision$} × {z:.precision$}")
    }
}

/// Состояние загрузки ресурсов сцены
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneProgress {
    pub active: bool,
    /// Процент загрузки в диапазоне [0, 100]
    pub progress: f32,
    /// Текущий загружаемый ресурс
    pub item: Option<String>,
}

impl SceneProgress {
    pub fn idle() -> Self {
        Self {
            active: false,
            progress: 0.0,
            item: None,
        }
    }

    pub fn active(progress: f32, item: Option<String>) -> Self {
        Self {
            active: true,
            progress: progress.clamp(0.0, 100.0),
            item,
        }
    }

    pub fn finished(item: Option<String>) -> Self {
        Self {
            active: false,
            progress: 100.0,
            item,
        }
    }
}

/// Описание ошибки загрузки
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    /// Ресурс, при загрузке которого произошла ошибка
    pub locator: Option<Locator>,
}

impl ErrorDetail {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locator: None,
        }
    }

    pub fn for_locator(message: impl Into<String>, locator: impl Into<Locator>) -> Self {
        Self {
            message: message.into(),
            locator: Some(locator.into()),
        }
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Сообщение трекера загрузки: либо прогресс, либо непустой список ошибок
pub type ProgressReport = Result<SceneProgress, Vec<ErrorDetail>>;

/// Содержимое вьюпорта
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "locator", rename_all = "snake_case")]
pub enum ViewerContent {
    #[default]
    NoContent,
    /// Тестовые объекты вместо модели
    Placeholder,
    Model(Locator),
}

impl ViewerContent {
    /// Модель имеет приоритет над тестовыми объектами; пустой локатор — это "нет модели"
    pub fn select(model: Option<&str>, show_test_objects: bool) -> Self {
        match model.map(str::trim) {
            Some(locator) if !locator.is_empty() => Self::Model(locator.to_string()),
            _ if show_test_objects => Self::Placeholder,
            _ => Self::NoContent,
        }
    }

    pub fn locator(&self) -> Option<&str> {
        match self {
            Self::Model(locator) => Some(locator),
            _ => None,
        }
    }

    /// Количество объектов для панели статуса
    pub fn object_count(&self) -> usize {
        match self {
            Self::NoContent => 0,
            Self::Placeholder => 4,
            Self::Model(_) => 1,
        }
    }
}
