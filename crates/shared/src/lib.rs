use serde::{Deserialize, Serialize};

/// Сырое описание меша в том виде, в каком его отдаёт экспорт (Z-up).
///
/// Все каналы индексируются номером исходной вершины. Отсутствующий
/// необязательный канал (`None`) отличается от пустого массива
/// (`Some(vec![])`), хотя сварщик трактует оба случая как "нет данных".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshDescription {
    /// Позиции вершин
    #[serde(alias = "Vertices")]
    pub vertices: Vec<[f32; 3]>,
    /// Треугольники: тройки индексов в `vertices`
    #[serde(alias = "Faces")]
    pub faces: Vec<[i64; 3]>,
    /// Нормали вершин (необязательно)
    #[serde(
        default,
        alias = "Vertex_Normals",
        skip_serializing_if = "Option::is_none"
    )]
    pub vertex_normals: Option<Vec<[f32; 3]>>,
    /// Угол уклона в градусах, 0..90 (необязательно)
    #[serde(
        default,
        alias = "Slope_Angles",
        skip_serializing_if = "Option::is_none"
    )]
    pub slope_angles: Option<Vec<f32>>,
}

impl MeshDescription {
    /// Описание только из позиций и граней
    pub fn new(vertices: Vec<[f32; 3]>, faces: Vec<[i64; 3]>) -> Self {
        Self {
            vertices,
            faces,
            vertex_normals: None,
            slope_angles: None,
        }
    }

    pub fn with_normals(mut self, normals: Vec<[f32; 3]>) -> Self {
        self.vertex_normals = Some(normals);
        self
    }

    pub fn with_slopes(mut self, slopes: Vec<f32>) -> Self {
        self.slope_angles = Some(slopes);
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Нормали, если канал присутствует и не пуст
    pub fn normals(&self) -> Option<&[[f32; 3]]> {
        self.vertex_normals.as_deref().filter(|n| !n.is_empty())
    }

    /// Углы уклона, если канал присутствует и не пуст
    pub fn slopes(&self) -> Option<&[f32]> {
        self.slope_angles.as_deref().filter(|s| !s.is_empty())
    }
}

/// Режим отображения меша
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadingMode {
    #[default]
    Shaded,
    ShadedWireframe,
    Wireframe,
    SlopeHeatmap,
    FaceSelection,
}

impl ShadingMode {
    /// Выбор граней кликом разрешён только в режиме выделения
    pub fn enables_selection(&self) -> bool {
        matches!(self, ShadingMode::FaceSelection)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ShadingMode::Shaded => "Shaded",
            ShadingMode::ShadedWireframe => "Shaded Wireframe",
            ShadingMode::Wireframe => "Wireframe",
            ShadingMode::SlopeHeatmap => "Slope Heatmap",
            ShadingMode::FaceSelection => "Face Selection",
        }
    }

    pub fn all() -> &'static [ShadingMode] {
        &[
            ShadingMode::Shaded,
            ShadingMode::ShadedWireframe,
            ShadingMode::Wireframe,
            ShadingMode::SlopeHeatmap,
            ShadingMode::FaceSelection,
        ]
    }
}
