//! サービスレコード型定義

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 監視対象サービス
///
/// 1つの監視対象エンドポイントと、最後に観測した稼働状態を保持する。
/// `name`がレジストリ内の一意キーとなる。
///
/// JSONフィールド名はAPIレスポンスと永続化ファイルで共通
/// （`Name` / `URL` / `IsUp` / `LastDown`、タイムスタンプはRFC3339）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// 一意識別子（プライマリキー）
    #[serde(rename = "Name")]
    pub name: String,
    /// プローブ対象のHTTP(S) URL
    #[serde(rename = "URL")]
    pub url: String,
    /// 最後に観測した稼働状態（初期値はfalse = 未確認）
    #[serde(rename = "IsUp", default)]
    pub is_up: bool,
    /// 最後にダウン遷移を観測した時刻
    ///
    /// up→down遷移時にのみ設定され、その後の復旧でもクリアされない。
    #[serde(rename = "LastDown", default, skip_serializing_if = "Option::is_none")]
    pub last_down: Option<DateTime<Utc>>,
}

impl ServiceRecord {
    /// 未確認状態の新規レコードを作成
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            is_up: false,
            last_down: None,
        }
    }
}
