use crate::core::FragmentId;
use std::fmt;

/// 断片名を `:name:` 形式で行ごとに連結する
///
/// 出力をそのままチャットに貼り付けると元の画像が再構成される。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupComposer {
    rows: Vec<String>,
}

impl MarkupComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 断片を該当する行の末尾に追加する
    pub fn push(&mut self, id: FragmentId, name: &str) {
        let row = id.row as usize;
        if self.rows.len() <= row {
            self.rows.resize(row + 1, String::new());
        }
        self.rows[row].push(':');
        self.rows[row].push_str(name);
        self.rows[row].push(':');
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// 行を改行で連結したテキスト
    pub fn render(&self) -> String {
        self.rows.join("\n")
    }
}

impl fmt::Display for MarkupComposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
