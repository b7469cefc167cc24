//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパーを提供します。
#![cfg(test)]

use std::io;
use std::sync::{
    Arc,
    Mutex,
};

use tracing::Dispatch;

/// ログ出力をメモリに記録する
///
/// グローバルな subscriber を設定せずに、`Dispatch` 経由でログを検証するために使う
#[derive(Clone, Debug, Default)]
pub(crate) struct LogCapture {
    /// 書き込まれたバイト列
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// 空のキャプチャを作成
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// このバッファに書き込む `Dispatch` を作成
    pub(crate) fn dispatch(&self) -> Dispatch {
        let capture = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || capture.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        Dispatch::new(subscriber)
    }

    /// 記録されたログを文字列として取得
    pub(crate) fn contents(&self) -> String {
        self.buffer
            .lock()
            .map(|buffer| String::from_utf8_lossy(&buffer).into_owned())
            .unwrap_or_default()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .map_err(|_| io::Error::other("log buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
