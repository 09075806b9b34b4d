// 領域層：流向規格的資料模型與介面

pub mod model;
pub mod ports;
