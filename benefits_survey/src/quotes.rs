//! What the respondents said about their company.
//!
//! The selection is fixed and is displayed as is.

/// A quote, with the company of the respondent who wrote it.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct Quote {
    pub company: &'static str,
    pub text: &'static str,
}

pub const POSITIVE_QUOTES: &[Quote] = &[
    Quote {
        company: "Gotfriends",
        text: "הייתה הבנה שיש קושי בתפוקה ונירמלו את זה, מה שעזר לי באופן אישי לא לחשוש מה יקרה אם התפוקה תרד ובכל- בחלק מהימים התפוקה אפילו הייתה מעל הממוצע",
    },
    Quote {
        company: "Apple",
        text: "אחרי שיחה קצרה על הקשיים אושר מענק כספי מכובד",
    },
    Quote {
        company: "LinkedIn",
        text: "המון הכלה והבנה למצב",
    },
    Quote {
        company: "Mastercard",
        text: "פינוי למלון לאילת למעוניינים",
    },
];

pub const NEGATIVE_QUOTES: &[Quote] = &[
    Quote {
        company: "The Phoenix",
        text: "כל עוד הנחיות פיקוד העורף מאפשרות הגעה פיזית הם נצמדים לזה. תחושה לא נעימה כי גם כשאפשר להגיע אנשים לא רוצים תמיד לבוא כי הם מפחדים",
    },
    Quote {
        company: "Metropoline",
        text: "הייתי מצפה למתן מענה אנושי יותר לצרכים ולא רק עבודה מהבית",
    },
    Quote {
        company: "Cato Networks",
        text: "נתקעתי בחו\"ל. המנהל שלי לא עדכן אף אחד. HR דיברו איתי פעם אחת כחלק מסבב טלפונים שעשו לכל הישראלים.",
    },
];
