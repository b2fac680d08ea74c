use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    static ref FRENCH: HashSet<&'static str> = {
        let words: &[&str] = &[
            "au","aux","avec","ce","ces","dans","de","des","du","elle","en","et","eux","il","ils","je",
            "la","le","les","leur","lui","ma","mais","me","même","mes","moi","mon","ne","nos","notre","nous",
            "on","ou","par","pas","pour","qu","que","qui","sa","se","ses","son","sur","ta","te","tes","toi",
            "ton","tu","un","une","vos","votre","vous","c","d","j","l","à","m","n","s","t","y",
            "été","étée","étées","étés","étant","étante","étants","étantes",
            "suis","es","est","sommes","êtes","sont","serai","seras","sera","serons","serez","seront",
            "serais","serait","serions","seriez","seraient","étais","était","étions","étiez","étaient",
            "fus","fut","fûmes","fûtes","furent","sois","soit","soyons","soyez","soient",
            "fusse","fusses","fût","fussions","fussiez","fussent",
            "ayant","ayante","ayantes","ayants","eu","eue","eues","eus","ai","as","avons","avez","ont",
            "aurai","auras","aura","aurons","aurez","auront","aurais","aurait","aurions","auriez","auraient",
            "avais","avait","avions","aviez","avaient","eut","eûmes","eûtes","eurent",
            "aie","aies","ait","ayons","ayez","aient","eusse","eusses","eût","eussions","eussiez","eussent"
        ];
        words.iter().copied().collect()
    };
}

/// Lowercase and split on whitespace. Punctuation is kept, duplicates are kept.
pub fn tokenize_query(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}

/// Stopword lookup used by positional count weighting.
#[derive(Debug, Clone, Default)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    pub fn empty() -> Self { Self::default() }

    /// The bundled French list.
    pub fn french() -> Self { FRENCH.iter().copied().collect() }

    /// One word per line; blank lines and `#` comments are ignored.
    pub fn parse(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect()
    }

    pub fn contains(&self, token: &str) -> bool { self.words.contains(&token.to_lowercase()) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }
}

impl<S: AsRef<str>> FromIterator<S> for Stopwords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self { words: iter.into_iter().map(|w| w.as_ref().to_lowercase()).collect() }
    }
}
