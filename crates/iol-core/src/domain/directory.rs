//! 심볼 디렉토리 타입.
//!
//! 시세 목록 페이지에서 수집한 심볼 → 상세 페이지 URL 매핑과,
//! (국가, 상품 유형) 조합을 어떤 목록 페이지로 보낼지 결정하는 분류를 정의합니다.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// 기본 국가
pub const DEFAULT_COUNTRY: &str = "argentina";

/// 기본 상품 유형
pub const DEFAULT_INSTRUMENT: &str = "acciones";

/// 미국 시장 국가 식별자
pub const US_COUNTRY: &str = "estados-unidos";

/// 디렉토리 항목.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolEntry {
    /// 심볼
    pub symbol: String,
    /// 상세 페이지 URL
    pub url: String,
}

/// 심볼 → 상세 페이지 URL 매핑.
///
/// 삽입 순서를 유지하며 키는 유일합니다. 같은 심볼이 다시 들어오면
/// 처음 들어온 항목과 그 위치를 유지합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolDirectory {
    entries: Vec<SymbolEntry>,
    index: HashMap<String, usize>,
}

impl SymbolDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 항목을 추가합니다. 이미 있는 심볼이면 무시하고 `false`를 반환합니다.
    pub fn insert(&mut self, symbol: impl Into<String>, url: impl Into<String>) -> bool {
        let symbol = symbol.into();
        if self.index.contains_key(&symbol) {
            return false;
        }
        self.index.insert(symbol.clone(), self.entries.len());
        self.entries.push(SymbolEntry {
            symbol,
            url: url.into(),
        });
        true
    }

    /// 두 디렉토리를 이어 붙입니다. 중복 심볼은 앞쪽 항목이 남습니다.
    pub fn merge(mut self, other: SymbolDirectory) -> Self {
        for entry in other.entries {
            self.insert(entry.symbol, entry.url);
        }
        self
    }

    /// 심볼의 상세 페이지 URL을 조회합니다.
    pub fn get(&self, symbol: &str) -> Option<&str> {
        self.index
            .get(symbol)
            .map(|&i| self.entries[i].url.as_str())
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.index.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SymbolEntry> {
        self.entries.iter()
    }

    /// 심볼 목록을 삽입 순서대로 반환합니다.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.symbol.as_str())
    }
}

impl<S: Into<String>, U: Into<String>> FromIterator<(S, U)> for SymbolDirectory {
    fn from_iter<I: IntoIterator<Item = (S, U)>>(iter: I) -> Self {
        let mut directory = Self::new();
        for (symbol, url) in iter {
            directory.insert(symbol, url);
        }
        directory
    }
}

/// 업스트림 내부 식별자.
///
/// 일부 엔드포인트는 티커 대신 상세 페이지 URL의 마지막 경로 조각을 사용합니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct InternalId(String);

impl InternalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// URL의 마지막 `/` 조각을 추출합니다.
    ///
    /// 쿼리 문자열, 프래그먼트, 끝의 `/`는 무시합니다. 조각이 비어 있으면 `None`.
    pub fn from_url(url: &str) -> Option<Self> {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        path.trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .map(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for InternalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// "todos" 목록 페이지를 쓰는 상품 유형.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingKind {
    /// 채권
    Bonds,
    /// CEDEAR (해외 주식 예탁증서)
    Cedears,
}

impl ListingKind {
    /// URL 경로 조각
    pub fn path(&self) -> &'static str {
        match self {
            Self::Bonds => "bonos",
            Self::Cedears => "cedears",
        }
    }
}

/// (국가, 상품 유형) 조합의 분류.
///
/// 조합은 아래 순서로 평가되며 처음 일치한 경우가 적용됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryQuery {
    /// (argentina, acciones): panel-general + panel-lideres 두 페이지
    ArgentinaStocks,
    /// (*, opciones): "todas" 페이지
    Options { country: String },
    /// (*, bonos) / (*, cedears): "todos" 페이지
    Listing { country: String, kind: ListingKind },
    /// (estados-unidos, *): 미국 시세 최상위 페이지
    UnitedStates,
    /// 지원하지 않는 조합
    Unsupported { country: String, instrument: String },
}

/// 시세 목록 페이지 공통 경로
const LISTING_ROOT: &str = "/mercado/cotizaciones";

impl DirectoryQuery {
    /// (국가, 상품 유형) 조합을 분류합니다. 대소문자와 앞뒤 공백은 무시합니다.
    pub fn classify(country: &str, instrument: &str) -> Self {
        let country = country.trim().to_lowercase();
        let instrument = instrument.trim().to_lowercase();

        match (country.as_str(), instrument.as_str()) {
            ("argentina", "acciones") => Self::ArgentinaStocks,
            (_, "opciones") => Self::Options { country },
            (_, "bonos") => Self::Listing {
                country,
                kind: ListingKind::Bonds,
            },
            (_, "cedears") => Self::Listing {
                country,
                kind: ListingKind::Cedears,
            },
            (US_COUNTRY, _) => Self::UnitedStates,
            _ => Self::Unsupported {
                country,
                instrument,
            },
        }
    }

    /// 조회할 목록 페이지 경로를 순서대로 반환합니다. 모두 성공해야 결과가 유효합니다.
    pub fn page_paths(&self) -> Vec<String> {
        match self {
            Self::ArgentinaStocks => vec![
                format!("{}/argentina/acciones/panel-general", LISTING_ROOT),
                format!("{}/argentina/acciones/panel-lideres", LISTING_ROOT),
            ],
            Self::Options { country } => {
                vec![format!("{}/{}/opciones/todas", LISTING_ROOT, country)]
            }
            Self::Listing { country, kind } => {
                vec![format!("{}/{}/{}/todos", LISTING_ROOT, country, kind.path())]
            }
            Self::UnitedStates => vec![format!("{}/{}", LISTING_ROOT, US_COUNTRY)],
            Self::Unsupported { .. } => Vec::new(),
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported { .. })
    }
}
